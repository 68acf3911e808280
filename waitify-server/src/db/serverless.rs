//! Serverless SQL driver
//!
//! Opens a fresh connection for each call and closes it afterwards; no
//! connection outlives a request.

use std::fmt;

use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

use crate::config::ServerlessSettings;
use crate::error::DbError;

const VERSION_QUERY: &str = "SELECT version()";

#[derive(Clone)]
pub struct ServerlessDriver {
    options: PgConnectOptions,
}

impl ServerlessDriver {
    pub fn new(settings: &ServerlessSettings) -> Self {
        Self {
            options: settings.options.clone(),
        }
    }

    /// Run `SELECT version()` and return the first column of the first row.
    pub async fn server_version(&self) -> Result<String, DbError> {
        let mut conn = PgConnection::connect_with(&self.options).await?;

        let version: String = sqlx::query_scalar(VERSION_QUERY)
            .fetch_one(&mut conn)
            .await?;

        if let Err(e) = conn.close().await {
            tracing::debug!("Closing serverless connection failed: {}", e);
        }

        Ok(version)
    }
}

impl fmt::Debug for ServerlessDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerlessDriver")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .finish_non_exhaustive()
    }
}
