//! In-memory user store

use super::UserRepository;
use crate::types::{User, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

/// Source of candidate identifiers for new records
pub type IdGenerator = Box<dyn Fn() -> UserId + Send + Sync>;

/// Process-local user store guarded by a read-write lock
///
/// Insert holds the write lock across the uniqueness check and the insertion,
/// so two concurrent inserts can never claim the same identifier.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
    generate_id: IdGenerator,
}

impl InMemoryUserStore {
    /// Create an empty store using random v4 identifiers
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UserId::generate))
    }

    /// Create an empty store drawing identifiers from `generate_id`
    pub fn with_id_generator(generate_id: IdGenerator) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            generate_id,
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryUserStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn insert(&self, user: User) -> (UserId, User) {
        let mut users = self.users.write().await;

        let mut attempts = 1u32;
        loop {
            let id = (self.generate_id)();
            match users.entry(id) {
                Entry::Occupied(_) => {
                    tracing::warn!("Identifier collision on {}, regenerating", id);
                    attempts += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(user.clone());
                    tracing::debug!("Stored user {} after {} attempt(s)", id, attempts);
                    return (id, user);
                }
            }
        }
    }

    async fn find_all(&self) -> Vec<(UserId, User)> {
        self.users
            .read()
            .await
            .iter()
            .map(|(id, user)| (*id, user.clone()))
            .collect()
    }

    async fn find_by_id(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    async fn update(&self, id: UserId, user: User) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(stored) => {
                *stored = user;
                true
            }
            None => false,
        }
    }

    async fn delete(&self, id: UserId) -> bool {
        self.users.write().await.remove(&id).is_some()
    }
}
