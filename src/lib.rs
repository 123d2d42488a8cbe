//! # users-graphql
//!
//! A GraphQL API exposing CRUD operations over an in-memory collection of
//! user records.
//!
//! ## Features
//!
//! - **Ordered Record Store**: users kept in creation order behind one lock
//! - **GraphQL Schema**: `users`, `user`, `createUser`, `updateUser`, `deleteUser`
//! - **GET and POST**: standard GraphQL-over-HTTP on a single path
//! - **Playground and SDL**: interactive explorer and schema export
//! - **YAML Configuration**: every setting optional, sensible defaults
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use users_graphql::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_config(ServerConfig::default())
//!         .with_user_service(InMemoryUserStore::seeded())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::ServerConfig;
    pub use crate::core::{
        ConfigError, NewUser, RequestError, StorageError, User, UserPatch, UserService,
        UsersError,
    };
    pub use crate::server::exposure::graphql::{UsersSchema, build_schema};
    pub use crate::server::{GraphQLExposure, RestExposure, ServerBuilder, ServerHost};
    pub use crate::storage::InMemoryUserStore;
}
