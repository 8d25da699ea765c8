//! Error handling for the profile API
//!
//! [`Error`] covers startup and configuration failures; [`ApiError`] is the
//! taxonomy of failures reported to HTTP clients.

pub mod api;
pub mod types;

pub use api::ApiError;
pub use types::{Error, Result};
