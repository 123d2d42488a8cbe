//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Environment variable holding the path of the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "USERS_GRAPHQL_CONFIG";

/// Environment variable overriding the configured port
pub const PORT_ENV: &str = "PORT";

/// Paths owned by the health routes
const RESERVED_PATHS: [&str; 2] = ["/health", "/healthz"];

/// Server configuration
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration that reproduces the stock behaviour: port 8080, `/graphql`,
/// playground on, pretty JSON, two seed users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to bind
    pub port: u16,

    /// Path of the GraphQL endpoint (e.g., "/graphql")
    pub endpoint: String,

    /// Serve the GraphQL playground under `{endpoint}/playground`
    pub playground: bool,

    /// Pretty-print JSON responses
    pub pretty: bool,

    /// Add a permissive CORS layer
    pub cors: bool,

    /// Start with the two seed users instead of an empty store
    pub seed_users: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            endpoint: "/graphql".to_string(),
            playground: true,
            pretty: true,
            cors: false,
            seed_users: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Whitespace-only input yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// Reads the file named by `USERS_GRAPHQL_CONFIG` when set, then applies
    /// `PORT` on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        let port = std::env::var(PORT_ENV).ok();
        Self::load(path.as_deref(), port.as_deref())
    }

    /// Load from an optional file, then apply an optional port override
    pub fn load(path: Option<&str>, port_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        if let Some(port) = port_override {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "port".to_string(),
                message: format!("'{}' is not a valid port number", port),
            })?;
        }

        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "endpoint".to_string(),
                message: format!("'{}' must start with '/'", self.endpoint),
            });
        }
        if self.endpoint.len() > 1 && self.endpoint.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "endpoint".to_string(),
                message: format!("'{}' must not end with '/'", self.endpoint),
            });
        }
        if RESERVED_PATHS.contains(&self.endpoint.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "endpoint".to_string(),
                message: format!("'{}' is reserved for health checks", self.endpoint),
            });
        }
        if self.endpoint.contains(['{', '}', '*']) {
            return Err(ConfigError::InvalidValue {
                field: "endpoint".to_string(),
                message: format!("'{}' must not contain path parameters", self.endpoint),
            });
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Address string accepted by `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the playground page
    pub fn playground_path(&self) -> String {
        format!("{}/playground", self.endpoint.trim_end_matches('/'))
    }

    /// Path of the SDL export
    pub fn schema_path(&self) -> String {
        format!("{}/schema", self.endpoint.trim_end_matches('/'))
    }
}
