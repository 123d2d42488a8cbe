//! Core domain types and traits

pub mod error;
pub mod service;
pub mod user;

pub use error::{ConfigError, RequestError, StorageError, UsersError};
pub use service::UserService;
pub use user::{NewUser, User, UserPatch};
