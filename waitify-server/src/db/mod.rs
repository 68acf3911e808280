//! Database clients
//!
//! Exactly one variant is constructed per process, and construction never
//! touches the network: the pool connects lazily, the managed client only
//! builds an HTTP client, and the serverless driver connects per call.

pub mod managed;
pub mod pool;
pub mod serverless;

use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::error::DbError;

pub use managed::ManagedClient;
pub use pool::create_pool;
pub use serverless::ServerlessDriver;

/// Process-wide database handle.
#[derive(Clone, Debug, Default)]
pub enum Database {
    #[default]
    None,
    Pool(PgPool),
    Managed(ManagedClient),
    Serverless(ServerlessDriver),
}

impl Database {
    /// Construct the client described by `config`.
    ///
    /// Must be called from within a tokio runtime: the pool spawns its
    /// maintenance task on creation.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let database = match config {
            DatabaseConfig::None => Self::None,
            DatabaseConfig::Pool(settings) => {
                tracing::info!(pool = ?settings, "Database pool configured");
                Self::Pool(create_pool(settings))
            }
            DatabaseConfig::Managed(settings) => {
                tracing::debug!(client = ?settings, "Managed backend client configured");
                Self::Managed(ManagedClient::new(settings)?)
            }
            DatabaseConfig::Serverless(settings) => {
                tracing::debug!(driver = ?settings, "Serverless driver configured");
                Self::Serverless(ServerlessDriver::new(settings))
            }
        };
        Ok(database)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pool(_) => "pool",
            Self::Managed(_) => "managed",
            Self::Serverless(_) => "serverless",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ManagedSettings, PoolSettings, ServerlessSettings};

    // Nothing listens on port 1, so any eager connect would fail.
    const UNREACHABLE_URL: &str = "postgres://app:pw@127.0.0.1:1/waitify";

    #[tokio::test]
    async fn pool_construction_does_not_connect() {
        let settings =
            PoolSettings::from_parts(Some("127.0.0.1"), Some("waitify"), Some("app"), Some("pw"))
                .unwrap();
        let database = Database::connect(&DatabaseConfig::Pool(settings)).unwrap();
        assert_eq!(database.kind(), "pool");
    }

    #[tokio::test]
    async fn managed_construction_does_not_connect() {
        let settings =
            ManagedSettings::from_parts(Some("http://127.0.0.1:1"), Some("key")).unwrap();
        let database = Database::connect(&DatabaseConfig::Managed(settings)).unwrap();
        assert_eq!(database.kind(), "managed");
    }

    #[tokio::test]
    async fn serverless_construction_does_not_connect() {
        let settings = ServerlessSettings::from_parts(Some(UNREACHABLE_URL)).unwrap();
        let database = Database::connect(&DatabaseConfig::Serverless(settings)).unwrap();
        assert_eq!(database.kind(), "serverless");
    }

    #[test]
    fn none_needs_no_runtime() {
        let database = Database::connect(&DatabaseConfig::None).unwrap();
        assert_eq!(database.kind(), "none");
    }
}
