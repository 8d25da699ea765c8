//! Application error type

use std::{net::SocketAddr, path::PathBuf};
use thiserror::Error;

/// Startup and configuration failures
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::Settings`]
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configuration value is out of range or malformed
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Listening socket could not be opened
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }
}
