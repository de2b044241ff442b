//! Server configuration.
//!
//! Values come from `BRANDHUB_*` environment variables (a `.env` file in the
//! working directory is loaded first, if present). `DATABASE_URL` is honoured
//! as a fallback for the database connection string.

use anyhow::Context;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "BRANDHUB";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,

    /// Postgres connection string. When unset, brands live in memory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Upper bound for the Postgres connection pool.
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ApiConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::from_environment(Environment::with_prefix(ENV_PREFIX))
            .context("invalid BRANDHUB_* configuration")?;
        if cfg.database_url.is_none() {
            cfg.database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        }
        Ok(cfg)
    }

    /// Build configuration from an explicit environment source on top of the defaults.
    pub fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Whether brands are persisted in Postgres.
    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }
}
