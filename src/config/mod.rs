//! Configuration management for the profile API
//!
//! This module handles loading and managing configuration settings from
//! defaults, a TOML file and environment variables.

pub mod loader;
pub mod settings;

pub use loader::ConfigSource;
pub use settings::Settings;

/// Serializes tests that read or modify process environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `f` with each variable set (`Some`) or removed (`None`), restoring the
/// previous values afterwards
///
/// Callers must hold [`ENV_TEST_MUTEX`].
#[cfg(test)]
pub(crate) fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let saved: Vec<_> = vars
        .iter()
        .map(|(name, _)| (name.to_string(), std::env::var(name).ok()))
        .collect();

    let apply = |name: &str, value: Option<&str>| unsafe {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    };

    for (name, value) in vars {
        apply(name, *value);
    }
    let result = f();
    for (name, previous) in &saved {
        apply(name, previous.as_deref());
    }
    result
}
