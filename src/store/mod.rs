//! User storage
//!
//! [`UserRepository`] is the seam between the HTTP layer and storage.
//! [`InMemoryUserStore`] is the only implementation: a lock-guarded map that
//! lives as long as the process.

pub mod memory;

pub use memory::{IdGenerator, InMemoryUserStore};

use crate::types::{User, UserId};
use async_trait::async_trait;

/// Operations the HTTP layer needs from user storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store `user` under a freshly generated identifier
    ///
    /// Never fails. The identifier is unique among live records.
    async fn insert(&self, user: User) -> (UserId, User);

    /// Every stored record, in no particular order
    async fn find_all(&self) -> Vec<(UserId, User)>;

    /// The record stored under `id`, if any
    async fn find_by_id(&self, id: UserId) -> Option<User>;

    /// Replace the record stored under `id`
    ///
    /// Returns `false` and leaves storage untouched when `id` is unknown.
    async fn update(&self, id: UserId, user: User) -> bool;

    /// Remove the record stored under `id`
    ///
    /// Returns `false` when `id` is unknown.
    async fn delete(&self, id: UserId) -> bool;
}
