//! GraphQL API exposure
//!
//! Serves the user schema over HTTP:
//! - `GET  {endpoint}?query=...`  - query string request
//! - `POST {endpoint}`            - JSON body request
//! - `GET  {endpoint}/schema`     - SDL export
//! - `GET  {endpoint}/playground` - GraphQL Playground (when enabled)

pub mod schema;

use crate::core::error::{RequestError, UsersError};
use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::rejection::GraphQLRejection;
use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

pub use schema::{MutationRoot, QueryRoot, UserObject, UsersSchema, build_schema};

/// State shared by the GraphQL handlers
#[derive(Clone)]
struct GraphQLState {
    schema: UsersSchema,
    endpoint: Arc<str>,
    pretty: bool,
}

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// The schema is built once here and shared by every request.
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let config = &host.config;
        let state = GraphQLState {
            schema: build_schema(host.user_service.clone()),
            endpoint: Arc::from(config.endpoint.as_str()),
            pretty: config.pretty,
        };

        let mut router = Router::new()
            .route(
                &config.endpoint,
                get(graphql_handler).post(graphql_handler),
            )
            .route(&config.schema_path(), get(graphql_sdl));

        if config.playground {
            router = router.route(&config.playground_path(), get(graphql_playground));
        }

        Ok(router.with_state(state))
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    State(state): State<GraphQLState>,
    request: std::result::Result<GraphQLRequest, GraphQLRejection>,
) -> Response {
    let request = match request {
        Ok(request) => request.into_inner(),
        Err(rejection) => {
            tracing::debug!(error = %rejection.0, "Rejected GraphQL request");
            return UsersError::from(RequestError::InvalidBody {
                message: rejection.0.to_string(),
            })
            .into_response();
        }
    };

    tracing::debug!(operation = ?request.operation_name, "Executing GraphQL request");
    let response = state.schema.execute(request).await;
    if !response.errors.is_empty() {
        tracing::debug!(errors = response.errors.len(), "GraphQL request returned errors");
    }

    render_json(&response, state.pretty)
}

/// Serialize a GraphQL response, pretty-printed or compact
fn render_json(response: &async_graphql::Response, pretty: bool) -> Response {
    let body = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };

    match body {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => UsersError::Internal(format!("Failed to serialize response: {}", e))
            .into_response(),
    }
}

/// Handler for GraphQL playground UI
async fn graphql_playground(State(state): State<GraphQLState>) -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new(&state.endpoint)))
}

/// Handler for GraphQL schema SDL export
async fn graphql_sdl(State(state): State<GraphQLState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.schema.sdl(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::storage::InMemoryUserStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router(config: ServerConfig) -> Router {
        let host = ServerHost::new(config, Arc::new(InMemoryUserStore::seeded()));
        GraphQLExposure::build_router(Arc::new(host)).unwrap()
    }

    #[tokio::test]
    async fn test_post_query() {
        let response = router(ServerConfig::default())
            .oneshot(
                Request::post("/graphql")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query":"{ users { id } }"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_compact_output() {
        let config = ServerConfig {
            pretty: false,
            ..ServerConfig::default()
        };
        let response = router(config)
            .oneshot(
                Request::post("/graphql")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query":"{ user(id: \"1\") { id } }"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"data":{"user":{"id":"1"}}}"#);
    }

    #[tokio::test]
    async fn test_playground_can_be_disabled() {
        let config = ServerConfig {
            playground: false,
            ..ServerConfig::default()
        };
        let response = router(config)
            .oneshot(
                Request::get("/graphql/playground")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_endpoint() {
        let config = ServerConfig {
            endpoint: "/api/gql".to_string(),
            ..ServerConfig::default()
        };
        let response = router(config)
            .oneshot(
                Request::get("/api/gql/schema")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
