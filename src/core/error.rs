//! Typed error handling for the users GraphQL service
//!
//! GraphQL field errors (a failing resolver) travel inside the GraphQL
//! response as `async_graphql::Error`. The types in this module cover what
//! happens around the schema: configuration loading, storage failures and
//! HTTP requests that never reach the executor.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration file reading and validation
//! - [`StorageError`]: failures of the record store
//! - [`RequestError`]: HTTP requests that cannot be decoded
//!
//! # Example
//!
//! ```rust,ignore
//! use users_graphql::prelude::*;
//!
//! match ServerConfig::from_yaml_file("config.yaml") {
//!     Ok(config) => println!("listening on {}", config.bind_address()),
//!     Err(ConfigError::ReadError { path, .. }) => eprintln!("cannot read {}", path),
//!     Err(e) => eprintln!("bad config: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the service
#[derive(Debug)]
pub enum UsersError {
    /// Configuration errors
    Config(ConfigError),

    /// Record store errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for UsersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsersError::Config(e) => write!(f, "{}", e),
            UsersError::Storage(e) => write!(f, "{}", e),
            UsersError::Request(e) => write!(f, "{}", e),
            UsersError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for UsersError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UsersError::Config(e) => Some(e),
            UsersError::Storage(e) => Some(e),
            UsersError::Request(e) => Some(e),
            UsersError::Internal(_) => None,
        }
    }
}

/// A single entry of the `errors` array, shaped like a GraphQL error
#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    pub message: String,
    pub extensions: ErrorExtensions,
}

/// Machine-readable part of an [`ErrorEntry`]
#[derive(Debug, Serialize)]
pub struct ErrorExtensions {
    pub code: String,
}

/// Body returned for errors raised outside of GraphQL execution
///
/// It mirrors the GraphQL response shape so clients only ever have to look at
/// an `errors` array.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorEntry>,
}

impl UsersError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            UsersError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UsersError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UsersError::Request(e) => e.status_code(),
            UsersError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            UsersError::Config(_) => "CONFIG_ERROR",
            UsersError::Storage(_) => "STORAGE_ERROR",
            UsersError::Request(e) => e.error_code(),
            UsersError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            errors: vec![ErrorEntry {
                message: self.to_string(),
                extensions: ErrorExtensions {
                    code: self.error_code().to_string(),
                },
            }],
        }
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    ReadError { path: String, message: String },

    /// The YAML document is malformed
    ParseError { message: String },

    /// A field holds a value the server cannot use
    InvalidValue { field: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadError { path, message } => {
                write!(f, "Failed to read configuration file '{}': {}", path, message)
            }
            ConfigError::ParseError { message } => {
                write!(f, "Configuration parse error: {}", message)
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for field '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for UsersError {
    fn from(err: ConfigError) -> Self {
        UsersError::Config(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the record store
#[derive(Debug)]
pub enum StorageError {
    /// A thread panicked while holding the store lock
    LockPoisoned { operation: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { operation } => {
                write!(f, "Store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for UsersError {
    fn from(err: StorageError) -> Self {
        UsersError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// The body is not a decodable GraphQL request
    InvalidBody { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

impl From<RequestError> for UsersError {
    fn from(err: RequestError) -> Self {
        UsersError::Request(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_body_returns_400() {
        let err: UsersError = RequestError::InvalidBody {
            message: "expected value".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_BODY");
    }

    #[test]
    fn test_storage_error_returns_500() {
        let err: UsersError = StorageError::LockPoisoned {
            operation: "append".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_string().contains("append"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ReadError {
            path: "/etc/users.yaml".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("/etc/users.yaml"));

        let err = ConfigError::InvalidValue {
            field: "endpoint".to_string(),
            message: "must start with '/'".to_string(),
        };
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u16>("not a number").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_error_response_shape() {
        let err = UsersError::Request(RequestError::InvalidBody {
            message: "EOF while parsing".to_string(),
        });
        let body = serde_json::to_value(err.to_response()).unwrap();

        assert_eq!(body["errors"][0]["extensions"]["code"], "INVALID_BODY");
        assert!(
            body["errors"][0]["message"]
                .as_str()
                .unwrap()
                .contains("EOF while parsing")
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = UsersError::Internal("boom".to_string());
        assert!(err.source().is_none());

        let err: UsersError = ConfigError::ParseError {
            message: "bad".to_string(),
        }
        .into();
        assert!(err.source().is_some());
    }
}
