//! # configs
//!
//! Layered configuration: defaults, then an optional `config/default.toml`,
//! then `GUARDA__`-prefixed environment variables (loaded through dotenvy
//! in development). The database URL stays wrapped in `SecretString` so it
//! never lands in logs or debug output.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string, e.g. set via GUARDA__DATABASE__URL.
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let cfg: AppConfig = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.max_connections", 5_i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("GUARDA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        debug!(host = %cfg.server.host, port = cfg.server.port, "configuration loaded");
        Ok(cfg)
    }
}
