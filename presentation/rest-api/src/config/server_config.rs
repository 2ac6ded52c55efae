use std::time::Duration;

use super::env::{Lookup, parse_or};

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    /// Deadline handed to every repository call made for one request
    pub request_timeout: Duration,
    /// How long in-flight requests may run once a shutdown signal arrives
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: 8080)
    /// - REQUEST_TIMEOUT_SECS: Per-request deadline (default: 30)
    /// - SHUTDOWN_TIMEOUT_SECS: Graceful shutdown grace period (default: 5)
    pub fn from_lookup(lookup: Lookup<'_>) -> anyhow::Result<Self> {
        let ip = lookup("SERVICE_IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(lookup, "SERVICE_PORT", 8080u16)?;
        let request_timeout = parse_or(lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let shutdown_timeout = parse_or(lookup, "SHUTDOWN_TIMEOUT_SECS", 5u64)?;

        Ok(Self {
            ip,
            port,
            request_timeout: Duration::from_secs(request_timeout),
            shutdown_timeout: Duration::from_secs(shutdown_timeout),
        })
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
