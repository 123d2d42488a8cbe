//! Server module: host, exposures and the builder that wires them
//!
//! `ServerBuilder` produces a router with:
//! - the GraphQL endpoint (plus playground and SDL export)
//! - health check routes
//! - any custom routes supplied by the caller

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::{GraphQLExposure, RestExposure};
pub use host::ServerHost;
