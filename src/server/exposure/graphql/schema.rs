//! GraphQL schema for user records
//!
//! ```graphql
//! type User { id: String!  name: String!  email: String! }
//!
//! type Query {
//!   users: [User!]!
//!   user(id: String): User
//! }
//!
//! type Mutation {
//!   createUser(id: String!, name: String!, email: String!): User!
//!   updateUser(id: String!, name: String, email: String): User
//!   deleteUser(id: String!): User
//! }
//! ```
//!
//! Unknown or missing ids resolve to `null`, never to an error. Argument
//! coercion is left to async-graphql: a missing required argument or a
//! mistyped one fails validation before any resolver runs.

use async_graphql::*;
use std::sync::Arc;

use crate::core::{NewUser, User, UserPatch, UserService};

/// Schema type exposed by the GraphQL endpoint
pub type UsersSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// GraphQL view of a [`User`]
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Query root
pub struct QueryRoot {
    pub service: Arc<dyn UserService>,
}

#[Object(name = "Query")]
impl QueryRoot {
    /// All users, in creation order
    async fn users(&self) -> Result<Vec<UserObject>> {
        tracing::debug!("Resolving users");

        self.service
            .list()
            .await
            .map(|users| users.into_iter().map(UserObject::from).collect())
            .map_err(|e| Error::new(format!("Failed to list users: {}", e)))
    }

    /// The first user with the given id, or null
    async fn user(&self, id: Option<String>) -> Result<Option<UserObject>> {
        let Some(id) = id else {
            tracing::debug!("Resolving user without an id");
            return Ok(None);
        };
        tracing::debug!(id = %id, "Resolving user");

        self.service
            .find_by_id(&id)
            .await
            .map(|user| user.map(UserObject::from))
            .map_err(|e| Error::new(format!("Failed to get user: {}", e)))
    }
}

/// Mutation root
pub struct MutationRoot {
    pub service: Arc<dyn UserService>,
}

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Append a new user and return it
    ///
    /// The id is not checked for uniqueness.
    async fn create_user(&self, id: String, name: String, email: String) -> Result<UserObject> {
        let input = NewUser { id, name, email };
        tracing::info!(id = %input.id, "Creating user");

        self.service
            .append(input.into())
            .await
            .map(UserObject::from)
            .map_err(|e| Error::new(format!("Failed to create user: {}", e)))
    }

    /// Overwrite the provided fields and return the updated user, or null
    async fn update_user(
        &self,
        id: String,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<Option<UserObject>> {
        let patch = UserPatch::new(name, email);
        tracing::info!(id = %id, empty_patch = patch.is_empty(), "Updating user");

        let updated = self
            .service
            .update_fields(&id, patch)
            .await
            .map_err(|e| Error::new(format!("Failed to update user: {}", e)))?;

        if updated.is_none() {
            tracing::debug!(id = %id, "No user to update");
        }
        Ok(updated.map(UserObject::from))
    }

    /// Remove a user and return it as it was, or null
    async fn delete_user(&self, id: String) -> Result<Option<UserObject>> {
        tracing::info!(id = %id, "Deleting user");

        let removed = self
            .service
            .remove(&id)
            .await
            .map_err(|e| Error::new(format!("Failed to delete user: {}", e)))?;

        if removed.is_none() {
            tracing::debug!(id = %id, "No user to delete");
        }
        Ok(removed.map(UserObject::from))
    }
}

/// Build the schema over a user service
pub fn build_schema(service: Arc<dyn UserService>) -> UsersSchema {
    Schema::build(
        QueryRoot {
            service: service.clone(),
        },
        MutationRoot { service },
        EmptySubscription,
    )
    .finish()
}
