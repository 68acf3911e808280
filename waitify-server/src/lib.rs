//! waitify-server: HTTP server with an optional database client
//!
//! Serves a single root route. At startup one of three database clients
//! may be attached: a lazily connecting pool, a managed-backend HTTP
//! client, or a serverless driver that asks the database for its version
//! on every request.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod state;

pub use config::{DatabaseConfig, ManagedSettings, PoolSettings, ServerConfig, ServerlessSettings};
pub use db::Database;
pub use error::{ConfigError, DbError};
pub use http::{build_router, run_server, serve, ApiError, ServerError};
pub use state::AppState;
