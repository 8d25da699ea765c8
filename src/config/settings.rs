//! Configuration settings
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, `PROFILE_API_*` environment variables and command-line flags.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding `server.host`
pub const ENV_HOST: &str = "PROFILE_API_HOST";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "PROFILE_API_PORT";
/// Environment variable overriding `server.read_timeout` (seconds)
pub const ENV_READ_TIMEOUT: &str = "PROFILE_API_READ_TIMEOUT";
/// Environment variable overriding `server.write_timeout` (seconds)
pub const ENV_WRITE_TIMEOUT: &str = "PROFILE_API_WRITE_TIMEOUT";
/// Environment variable overriding `server.idle_timeout` (seconds)
pub const ENV_IDLE_TIMEOUT: &str = "PROFILE_API_IDLE_TIMEOUT";
/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "PROFILE_API_LOG_LEVEL";

// Helper functions for serde defaults
fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_read_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_write_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

// Duration serialization module
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Main configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Time allowed for a request body to arrive
    #[serde(with = "duration_secs", default = "default_read_timeout")]
    pub read_timeout: Duration,
    /// Time allowed to produce a response
    #[serde(with = "duration_secs", default = "default_write_timeout")]
    pub write_timeout: Duration,
    /// Time a keep-alive connection may wait for its next request
    #[serde(with = "duration_secs", default = "default_idle_timeout")]
    pub idle_timeout: Duration,
    /// Enable permissive CORS
    #[serde(default)]
    pub enable_cors: bool,
    /// Maximum request body size
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            read_timeout: default_read_timeout(),
            write_timeout: default_write_timeout(),
            idle_timeout: default_idle_timeout(),
            enable_cors: false,
            max_body_size: default_max_body_size(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

fn env_secs(name: &str, field: &str) -> crate::Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                crate::Error::config(field, format!("Invalid {} '{}': {}", name, raw, e))
            })?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}

impl Settings {
    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| crate::Error::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(toml::from_str(&content)?)
    }

    /// Apply every `PROFILE_API_*` variable that is set
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(host) = std::env::var(ENV_HOST) {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| crate::Error::config("port", format!("Invalid port: {}", e)))?;
        }

        if let Some(timeout) = env_secs(ENV_READ_TIMEOUT, "read_timeout")? {
            self.server.read_timeout = timeout;
        }
        if let Some(timeout) = env_secs(ENV_WRITE_TIMEOUT, "write_timeout")? {
            self.server.write_timeout = timeout;
        }
        if let Some(timeout) = env_secs(ENV_IDLE_TIMEOUT, "idle_timeout")? {
            self.server.idle_timeout = timeout;
        }

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        for (name, timeout) in [
            ("read_timeout", self.server.read_timeout),
            ("write_timeout", self.server.write_timeout),
            ("idle_timeout", self.server.idle_timeout),
        ] {
            if timeout.is_zero() {
                return Err(crate::Error::config(name, "Timeout cannot be 0"));
            }
        }

        if self.server.max_body_size == 0 {
            return Err(crate::Error::config(
                "max_body_size",
                "Maximum body size cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        Ok(())
    }
}
