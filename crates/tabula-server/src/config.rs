// ABOUTME: Configuration loading for the tabulad server.
// ABOUTME: Reads TABULAD_* environment variables with defaults matching the original deployment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TABULAD_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct TabuladConfig {
    pub home: PathBuf,
    pub bind: SocketAddr,
}

impl TabuladConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - TABULAD_HOME: data directory (default: ~/.tabulad)
    /// - TABULAD_BIND: socket address to bind (default: 127.0.0.1:5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = std::env::var("TABULAD_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::var("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/tmp"))
                    .join(".tabulad")
            });

        let bind_str =
            std::env::var("TABULAD_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        Ok(Self { home, bind })
    }
}
