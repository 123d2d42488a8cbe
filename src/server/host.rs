//! Server host for transport-agnostic API exposure
//!
//! The host holds everything an exposure needs to serve the API: the
//! configuration and the user service. Exposures (GraphQL, REST health
//! routes) consume an `Arc<ServerHost>` and produce an axum `Router`.

use crate::config::ServerConfig;
use crate::core::UserService;
use std::sync::Arc;

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(
///     ServerConfig::default(),
///     Arc::new(InMemoryUserStore::seeded()),
/// ));
/// let graphql_app = GraphQLExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The record store, behind the service trait
    pub user_service: Arc<dyn UserService>,
}

impl ServerHost {
    pub fn new(config: ServerConfig, user_service: Arc<dyn UserService>) -> Self {
        Self {
            config: Arc::new(config),
            user_service,
        }
    }
}
