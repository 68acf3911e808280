//! Axum server setup

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::ServerConfig;
use crate::state::AppState;

/// Largest request body the body extractors will accept.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::root::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let database = Database::connect(&DatabaseConfig::None)?;
/// run_server(AppState::new(database), ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    serve(listener, state).await
}

/// Serve on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    let app = build_router(state);

    tracing::info!("API listening at http://localhost:{}", addr.port());

    axum::serve(listener, app).await?;
    Ok(())
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn serves_hello_on_bound_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve(listener, AppState::new(Database::None)));

        let body = reqwest::get(format!("http://{addr}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "Hello world");

        server.abort();
    }

    #[tokio::test]
    async fn bind_conflict_is_io_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            bind_addr: taken.local_addr().unwrap(),
        };

        let err = run_server(AppState::new(Database::None), config)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
