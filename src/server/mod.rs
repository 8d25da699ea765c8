//! HTTP server implementation
//!
//! This module contains the router, the user handlers and the
//! connection-serving loop that applies the idle timeout.

pub mod app;
pub mod handlers;
pub mod response;
pub mod serve;

pub use app::{AppState, create_app, create_app_with_store};
pub use serve::{serve, shutdown_signal};
