//! Service trait for user record operations

use crate::core::user::{User, UserPatch};
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing user records
///
/// Implementations own the records; callers only ever receive clones.
/// Records keep insertion order, and every lookup by id returns the first
/// match in that order.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users in store order
    async fn list(&self) -> Result<Vec<User>>;

    /// Get the first user with the given id
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Append a user to the end of the store
    ///
    /// No uniqueness check is made on the id.
    async fn append(&self, user: User) -> Result<User>;

    /// Overwrite the fields present in `patch` on the first user with `id`
    ///
    /// Returns the updated record, or `None` when no user matches.
    async fn update_fields(&self, id: &str, patch: UserPatch) -> Result<Option<User>>;

    /// Remove the first user with `id`
    ///
    /// Returns the record as it was before removal, or `None` when no user
    /// matches.
    async fn remove(&self, id: &str) -> Result<Option<User>>;

    /// Number of stored users
    async fn count(&self) -> Result<usize>;
}
