use std::time::Duration;

use persistence::db::DatabaseConfig;

use super::env::{Lookup, parse_or, required};

/// Builds the pool configuration from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string, wins when set
/// - POSTGRES_HOST / POSTGRES_PORT: (default: "localhost" / 5432)
/// - POSTGRES_USER / POSTGRES_PASSWORD / POSTGRES_DB: required without DATABASE_URL
/// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
/// - DATABASE_ACQUIRE_TIMEOUT_SECS: Pool acquire timeout (default: 30)
///
/// # Errors
/// Returns error if the settings are missing or malformed
pub fn database_config(lookup: Lookup<'_>) -> anyhow::Result<DatabaseConfig> {
    let config = match lookup("DATABASE_URL") {
        Some(url) => DatabaseConfig::from_url(&url)?,
        None => {
            let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = parse_or(lookup, "POSTGRES_PORT", 5432u16)?;
            let user = required(lookup, "POSTGRES_USER")?;
            let password = required(lookup, "POSTGRES_PASSWORD")?;
            let database = required(lookup, "POSTGRES_DB")?;
            DatabaseConfig::from_parts(&host, port, &user, &password, &database)
        }
    };

    let max_connections = parse_or(lookup, "DATABASE_MAX_CONNECTIONS", config.max_connections)?;
    let acquire_timeout = parse_or(
        lookup,
        "DATABASE_ACQUIRE_TIMEOUT_SECS",
        config.acquire_timeout.as_secs(),
    )?;

    Ok(config
        .with_max_connections(max_connections)
        .with_acquire_timeout(Duration::from_secs(acquire_timeout)))
}
