use persistence::db::DatabaseConfig;

use super::env::{Lookup, process_env};
use super::{cors_config, database_config, server_config::ServerConfig};

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors_origins: Vec<String>,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_lookup(lookup)?,
            cors_origins: cors_config::allowed_origins(lookup),
            database: database_config::database_config(lookup)?,
        })
    }
}
