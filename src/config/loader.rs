//! Configuration file discovery
//!
//! Decides which TOML file, if any, seeds the settings. A file named
//! explicitly (flag or environment) must be readable; the per-user file is
//! only used when present.

use crate::{Result, config::Settings};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "PROFILE_API_CONFIG";

/// Where the configuration file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by `--config`
    Flag(PathBuf),
    /// Named by `PROFILE_API_CONFIG`
    Env(PathBuf),
    /// `<config dir>/profile-api/config.toml`
    UserDir(PathBuf),
    /// No file; built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Pick the configuration file: `flag`, then `PROFILE_API_CONFIG`, then
    /// the per-user file if it exists
    pub fn locate(flag: Option<&Path>) -> Self {
        if let Some(path) = flag {
            return Self::Flag(path.to_path_buf());
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Self::Env(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("profile-api").join("config.toml"))
            .filter(|path| path.is_file())
            .map_or(Self::Defaults, Self::UserDir)
    }

    /// File backing this source, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Env(path) | Self::UserDir(path) => Some(path),
            Self::Defaults => None,
        }
    }

    /// Read the file (or start from defaults) and apply environment overrides
    ///
    /// The result is not validated; command-line overrides still have to be
    /// applied on top.
    pub fn load(&self) -> Result<Settings> {
        let settings = match self.path() {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        settings.merge_with_env()
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "{} (--config)", path.display()),
            Self::Env(path) => write!(f, "{} ({})", path.display(), CONFIG_ENV_VAR),
            Self::UserDir(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}
