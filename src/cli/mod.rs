//! Command-line interface
//!
//! Argument parsing with clap, configuration overrides from CLI flags,
//! and dispatch to the server.

pub mod parser;
pub mod validation;

pub use parser::{Cli, Commands};

use anyhow::{Context, Result};

use crate::config::{ConfigLoader, Environment, Settings};
use crate::logger::init_logger;
use crate::server::Server;

impl Cli {
    /// Execute the parsed command line.
    ///
    /// Loads configuration, applies CLI overrides, initializes logging,
    /// and runs the selected command. With no subcommand, `serve` runs
    /// with its defaults.
    pub async fn run(self) -> Result<()> {
        let mut settings = self.load_settings()?;

        if self.verbose {
            settings.logger.level = "debug".to_string();
        } else if self.quiet {
            settings.logger.level = "error".to_string();
        }

        match self.command {
            Some(Commands::Serve {
                host,
                port,
                dry_run,
            }) => {
                if let Some(host) = host {
                    settings.server.host = host;
                }
                if let Some(port) = port {
                    settings.server.port = port;
                }

                if dry_run {
                    settings
                        .validate()
                        .context("Configuration validation failed")?;
                    println!("Configuration is valid");
                    println!("  server address: {}", settings.server.address());
                    println!("  data file:      {}", settings.storage.data_file);
                    println!("  log directory:  {}", settings.scheduler.log_dir);
                    return Ok(());
                }

                init_logger(&settings.logger)?;
                Server::new(settings).run().await
            }
            None => {
                init_logger(&settings.logger)?;
                Server::new(settings).run().await
            }
        }
    }

    /// Load settings, honoring `--config` and `--env` overrides.
    fn load_settings(&self) -> Result<Settings> {
        if let Some(env) = self.env {
            // SAFETY: called once at startup before any threads are spawned
            unsafe {
                std::env::set_var(Environment::ENV_VAR, Environment::from(env).as_str());
            }
        }

        if let Some(ref config_file) = self.config {
            // SAFETY: called once at startup before any threads are spawned
            unsafe {
                std::env::set_var("WEBCRON_CONFIG_FILE", config_file);
                std::env::remove_var("WEBCRON_CONFIG_DIR");
            }
        }

        let loader = ConfigLoader::new()?;
        loader.load().context("Failed to load configuration")
    }
}
