//! Startup configuration
//!
//! Everything here is read once when the process starts and stays fixed
//! for its lifetime. Settings that carry credentials redact them in their
//! `Debug` output so they can be logged as-is.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::Url;
use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// The pooled client always talks to this port.
pub const POSTGRES_PORT: u16 = 5432;

const REDACTED: &str = "***";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::new(host, port),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
    }
}

/// Which database client, if any, the process constructs.
#[derive(Debug, Clone, Default)]
pub enum DatabaseConfig {
    #[default]
    None,
    Pool(PoolSettings),
    Managed(ManagedSettings),
    Serverless(ServerlessSettings),
}

/// Discrete connection fields for the pooled client.
#[derive(Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl PoolSettings {
    /// Build from optional raw values, naming the first one that is absent.
    ///
    /// The password is taken verbatim and may be empty (trust/peer auth).
    pub fn from_parts(
        host: Option<&str>,
        database: Option<&str>,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            host: require(host, "DATABASE_HOST")?,
            database: require(database, "DATABASE_DB")?,
            user: require(user, "DATABASE_USER")?,
            password: password
                .map(str::to_string)
                .ok_or(ConfigError::Missing("DATABASE_PASSWORD"))?,
        })
    }

    /// Compose the fields into connection options on [`POSTGRES_PORT`].
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(POSTGRES_PORT)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

impl fmt::Debug for PoolSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolSettings")
            .field("host", &self.host)
            .field("port", &POSTGRES_PORT)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Base URL and API key for a managed backend.
#[derive(Clone)]
pub struct ManagedSettings {
    pub url: Url,
    pub api_key: String,
}

impl ManagedSettings {
    pub fn from_parts(url: Option<&str>, api_key: Option<&str>) -> Result<Self, ConfigError> {
        let raw = require(url, "DATABASE_URL")?;
        let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            var: "DATABASE_URL",
            reason: e.to_string(),
        })?;
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(ConfigError::Missing("DATABASE_API_KEY")),
        };
        Ok(Self { url, api_key })
    }
}

impl fmt::Debug for ManagedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedSettings")
            .field("url", &redact_url(&self.url))
            .field("api_key", &REDACTED)
            .finish()
    }
}

/// Connection URL for the per-request driver, parsed up front.
#[derive(Clone)]
pub struct ServerlessSettings {
    pub options: PgConnectOptions,
}

impl ServerlessSettings {
    pub fn from_parts(url: Option<&str>) -> Result<Self, ConfigError> {
        let raw = require(url, "DATABASE_URL")?;
        let options = raw
            .parse::<PgConnectOptions>()
            .map_err(|e| ConfigError::Invalid {
                var: "DATABASE_URL",
                reason: e.to_string(),
            })?;
        Ok(Self { options })
    }
}

impl fmt::Debug for ServerlessSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerlessSettings")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("database", &self.options.get_database())
            .field("user", &self.options.get_username())
            .finish_non_exhaustive()
    }
}

/// Identifier-like value, surrounding whitespace stripped.
fn require(value: Option<&str>, var: &'static str) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing(var)),
    }
}

pub(crate) fn redact_url(url: &Url) -> String {
    let mut url = url.clone();
    if url.password().is_some() {
        let _ = url.set_password(Some(REDACTED));
    }
    url.to_string()
}
