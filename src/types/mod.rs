//! Type definitions for the profile API
//!
//! This module contains the user record, its identifier and the JSON
//! envelope every response is wrapped in.

pub mod response;
pub mod user;

pub use response::Envelope;
pub use user::{User, UserId, UserResponse};
