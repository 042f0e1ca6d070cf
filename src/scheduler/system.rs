//! System crond implementation of [`SchedulerGateway`].

use std::process::Stdio;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::cron::CronJob;
use crate::error::{AppError, AppResult};
use crate::scheduler::{SchedulerGateway, render_table};

/// Talks to the host's cron daemon through its standard tooling:
/// `crond` to start, `pgrep` to probe, `crontab -` to install the
/// table, and a HUP signal to reload.
#[derive(Debug, Clone, Default)]
pub struct SystemCrontab;

impl SystemCrontab {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SchedulerGateway for SystemCrontab {
    async fn ensure_running(&self) {
        // crond daemonizes itself; a second start is a harmless no-op.
        match Command::new("crond").status().await {
            Ok(status) => {
                tracing::info!(exit = ?status.code(), "crond start requested");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start crond");
            }
        }
    }

    async fn is_running(&self) -> bool {
        match Command::new("pgrep").arg("crond").output().await {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    async fn install_table(&self, jobs: &[CronJob]) -> AppResult<()> {
        let table = render_table(jobs);

        let install = async {
            let mut child = Command::new("crontab")
                .arg("-")
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .context("spawning crontab")?;

            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("crontab stdin unavailable"))?;
            stdin
                .write_all(table.as_bytes())
                .await
                .context("writing table to crontab")?;
            drop(stdin);

            let output = child
                .wait_with_output()
                .await
                .context("waiting for crontab")?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(anyhow!(
                    "crontab exited with {}: {}",
                    output.status,
                    stderr.trim()
                ));
            }
            Ok(())
        };

        match install.await {
            Ok(()) => {
                tracing::info!(jobs = jobs.len(), "Crontab updated");
                Ok(())
            }
            Err(source) => {
                tracing::error!(error = %source, "Failed to update crontab");
                Err(AppError::Scheduler {
                    operation: "install crontab".to_string(),
                    source,
                })
            }
        }
    }

    async fn reload(&self) {
        // crond re-reads the table on HUP; absence of the daemon is fine.
        match Command::new("pkill").args(["-HUP", "crond"]).status().await {
            Ok(status) => {
                tracing::debug!(exit = ?status.code(), "Sent reload signal to crond");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Could not signal crond to reload");
            }
        }
    }
}
