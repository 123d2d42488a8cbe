//! In-memory implementation of UserService

use crate::core::error::StorageError;
use crate::core::{User, UserPatch, UserService};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory user store
///
/// Records live in a `Vec` so insertion order is store order. A single
/// `RwLock` guards every operation; each mutation finds and modifies its
/// record under one write lock. Clones share the same records.
#[derive(Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Create a store holding the two seed users
    pub fn seeded() -> Self {
        Self::with_users(User::seed())
    }

    /// Create a store starting from the given records, kept in order
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    fn read(&self, operation: &str) -> Result<RwLockReadGuard<'_, Vec<User>>> {
        self.users.read().map_err(|_| {
            StorageError::LockPoisoned {
                operation: operation.to_string(),
            }
            .into()
        })
    }

    fn write(&self, operation: &str) -> Result<RwLockWriteGuard<'_, Vec<User>>> {
        self.users.write().map_err(|_| {
            StorageError::LockPoisoned {
                operation: operation.to_string(),
            }
            .into()
        })
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserService for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.read("list")?.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.read("find_by_id")?;

        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn append(&self, user: User) -> Result<User> {
        let mut users = self.write("append")?;

        if users.iter().any(|existing| existing.id == user.id) {
            tracing::warn!(id = %user.id, "Appending user with an id that is already taken");
        }
        users.push(user.clone());

        Ok(user)
    }

    async fn update_fields(&self, id: &str, patch: UserPatch) -> Result<Option<User>> {
        let mut users = self.write("update_fields")?;

        Ok(users.iter_mut().find(|user| user.id == id).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }

    async fn remove(&self, id: &str) -> Result<Option<User>> {
        let mut users = self.write("remove")?;

        Ok(users
            .iter()
            .position(|user| user.id == id)
            .map(|index| users.remove(index)))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.read("count")?.len())
    }
}
