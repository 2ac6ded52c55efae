use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod metrics;
    pub mod tags;
    pub mod health {
        pub mod routes;
    }
    pub mod invoice {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}
mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod database_config;
    pub mod env;
    pub mod server_config;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use business::domain::logger::{LogField, Logger, Severity};
use config::app_config::AppConfig;
use logger::TracingLogger;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Initializes tracing, reads configuration, opens the database pool, wires
/// dependencies, and serves until a shutdown signal arrives.
///
/// - config/: environment-driven settings (server, CORS, database)
/// - setup/: dependency injection and server setup
/// - api/: route handlers, DTOs and the error translator
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize database; the service is useless without it
    let pool = match persistence::db::init_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            TracingLogger.log(
                Severity::Fatal,
                "failed to initialize database",
                &[LogField::new("error", e.to_string())],
            );
            std::process::exit(1);
        }
    };

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, config.server.request_timeout);

    // 6. Run server
    Server::run(config, container).await?;

    Ok(())
}
