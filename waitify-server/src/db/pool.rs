//! Database connection pool
//!
//! Built from discrete fields with sqlx defaults for sizing and timeouts.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::PoolSettings;

/// Create a PostgreSQL connection pool that connects on first use.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&settings);
/// ```
pub fn create_pool(settings: &PoolSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(settings.connect_options())
}
