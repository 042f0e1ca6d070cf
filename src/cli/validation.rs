//! Value parsers for CLI arguments

use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Validate a configuration file path argument
///
/// The file must exist and have a `.toml` extension.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: {}", value));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: {}", value));
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(path),
        _ => Err(format!(
            "Configuration file must have a .toml extension: {}",
            value
        )),
    }
}

/// Validate a host address argument
///
/// Accepts `localhost`, a hostname, or a valid IPv4 address.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if value == "localhost" {
        return Ok(value.to_string());
    }

    // Dotted numeric input must parse as a real IPv4 address
    if value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return match value.parse::<Ipv4Addr>() {
            Ok(_) => Ok(value.to_string()),
            Err(_) => Err(format!("Invalid IPv4 address: {}", value)),
        };
    }

    // Otherwise treat as a hostname
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        Ok(value.to_string())
    } else {
        Err(format!("Invalid host address: {}", value))
    }
}

/// Validate a port number argument
pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("Invalid port number: {}", value)),
    }
}
