use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use waitify_server::config::DEFAULT_PORT;
use waitify_server::{
    AppState, ConfigError, Database, DatabaseConfig, ManagedSettings, PoolSettings, ServerConfig,
    ServerlessSettings,
};

/// Database client attached at startup
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// No database client
    #[default]
    None,
    /// Connection pool from DATABASE_HOST/DB/USER/PASSWORD
    Pool,
    /// Managed backend from DATABASE_URL and DATABASE_API_KEY
    Managed,
    /// Per-request driver from DATABASE_URL, answers / with the server version
    Serverless,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind the HTTP server to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Database client to construct
    #[arg(long, env = "DATABASE_BACKEND", value_enum, default_value_t = Backend::None)]
    pub backend: Backend,

    /// Database host (pool)
    #[arg(long, env = "DATABASE_HOST")]
    pub database_host: Option<String>,

    /// Database name (pool)
    #[arg(long, env = "DATABASE_DB")]
    pub database_db: Option<String>,

    /// Database user (pool)
    #[arg(long, env = "DATABASE_USER")]
    pub database_user: Option<String>,

    /// Database password (pool)
    #[arg(long, env = "DATABASE_PASSWORD", hide_env_values = true)]
    pub database_password: Option<String>,

    /// Connection URL (managed, serverless)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// API key (managed)
    #[arg(long, env = "DATABASE_API_KEY", hide_env_values = true)]
    pub database_api_key: Option<String>,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.host, self.port)
    }

    pub fn database_config(&self) -> Result<DatabaseConfig, ConfigError> {
        let config = match self.backend {
            Backend::None => DatabaseConfig::None,
            Backend::Pool => DatabaseConfig::Pool(PoolSettings::from_parts(
                self.database_host.as_deref(),
                self.database_db.as_deref(),
                self.database_user.as_deref(),
                self.database_password.as_deref(),
            )?),
            Backend::Managed => DatabaseConfig::Managed(ManagedSettings::from_parts(
                self.database_url.as_deref(),
                self.database_api_key.as_deref(),
            )?),
            Backend::Serverless => DatabaseConfig::Serverless(ServerlessSettings::from_parts(
                self.database_url.as_deref(),
            )?),
        };
        Ok(config)
    }
}

pub async fn run_server(args: ServeArgs) -> Result<()> {
    let database_config = args
        .database_config()
        .context("invalid database configuration")?;
    let database =
        Database::connect(&database_config).context("could not construct database client")?;
    tracing::info!(backend = database.kind(), "Database client ready");

    waitify_server::run_server(AppState::new(database), args.server_config()).await?;
    Ok(())
}
