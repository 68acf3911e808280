//! HTTP server layer
//!
//! Axum server with:
//! - A single root route
//! - Request tracing
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, serve, ServerError, BODY_LIMIT_BYTES};
