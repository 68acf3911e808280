//! The root route
//!
//! `GET /` answers `Hello world`, except when the serverless driver is
//! attached: then it answers with the database server's version string.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::http::ApiError;
use crate::state::AppState;

pub const HELLO: &str = "Hello world";

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// GET /
async fn root(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.database() {
        Database::Serverless(driver) => {
            let version = driver.server_version().await?;
            Ok(Json(VersionResponse { version }).into_response())
        }
        Database::None | Database::Pool(_) | Database::Managed(_) => Ok(HELLO.into_response()),
    }
}

/// Root routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ManagedSettings, PoolSettings, ServerlessSettings};
    use crate::http::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app(config: DatabaseConfig) -> Router {
        let database = Database::connect(&config).unwrap();
        build_router(AppState::new(database))
    }

    fn get_root() -> Request<Body> {
        Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    async fn assert_hello(app: Router) {
        let response = app.oneshot(get_root()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], HELLO.as_bytes());
    }

    #[tokio::test]
    async fn hello_without_database() {
        assert_hello(app(DatabaseConfig::None)).await;
    }

    #[tokio::test]
    async fn hello_with_unused_pool() {
        let settings =
            PoolSettings::from_parts(Some("127.0.0.1"), Some("waitify"), Some("app"), Some("pw"))
                .unwrap();
        assert_hello(app(DatabaseConfig::Pool(settings))).await;
    }

    #[tokio::test]
    async fn hello_with_unused_managed_client() {
        let settings =
            ManagedSettings::from_parts(Some("http://127.0.0.1:1"), Some("key")).unwrap();
        assert_hello(app(DatabaseConfig::Managed(settings))).await;
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let response = app(DatabaseConfig::None)
            .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_get_is_routed() {
        let response = app(DatabaseConfig::None)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("name=queue"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn serverless_failure_fails_request() {
        let settings =
            ServerlessSettings::from_parts(Some("postgres://app:pw@127.0.0.1:1/waitify"))
                .unwrap();
        let response = app(DatabaseConfig::Serverless(settings))
            .oneshot(get_root())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn serverless_returns_version() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let settings = ServerlessSettings::from_parts(Some(&url)).unwrap();

        let response = app(DatabaseConfig::Serverless(settings))
            .oneshot(get_root())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: VersionResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.version.is_empty());
    }
}
