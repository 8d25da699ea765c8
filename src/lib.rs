//! Profile API
//!
//! An in-memory CRUD service for user profiles exposed over HTTP with JSON
//! payloads. Records live in a process-local store and are lost when the
//! process exits.
//!
//! # Endpoints
//!
//! | Method | Path              | Success                    |
//! |--------|-------------------|----------------------------|
//! | POST   | `/api/users`      | 201 `{"data":{id, ...}}`   |
//! | GET    | `/api/users`      | 200 `{"data":[...]}`       |
//! | GET    | `/api/users/{id}` | 200 `{"data":{id, ...}}`   |
//! | PUT    | `/api/users/{id}` | 204                        |
//! | DELETE | `/api/users/{id}` | 204                        |
//!
//! # Usage
//!
//! ```bash
//! profile-api --host 0.0.0.0 --port 8080
//! ```
//!
//! # Examples
//!
//! ```rust
//! use profile_api::{Settings, server::create_app};
//!
//! let settings = Settings::default();
//! let app = create_app(&settings);
//! # let _ = app;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
pub mod utils;

pub use config::{ConfigSource, Settings};
pub use error::{ApiError, Error, Result};
pub use store::{InMemoryUserStore, UserRepository};
pub use types::{Envelope, User, UserId, UserResponse};
