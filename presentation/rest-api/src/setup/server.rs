use poem::middleware::Tracing;
use poem::{Endpoint, EndpointExt, Response, Route, Server as PoemServer, listener::TcpListener};
use poem_openapi::OpenApiService;

use crate::api::error::with_translator;
use crate::api::metrics::with_metrics;
use crate::config::{app_config::AppConfig, cors_config::init_cors};
use crate::setup::dependency_injection::DependencyContainer;

pub struct Server;

/// Mounts the APIs, Swagger UI and OpenAPI document behind the error
/// translator, with request metrics recorded on the translated responses.
pub fn build_app(
    container: DependencyContainer,
    server_url: &str,
) -> impl Endpoint<Output = Response> + use<> {
    let api_service = OpenApiService::new(
        (container.health_api, container.invoice_api, container.metrics_api),
        "Invoice API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);
    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();
    let routes = Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .nest("/openapi.json", spec);

    with_metrics(with_translator(routes, container.logger), container.metrics)
}

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let app = build_app(container, &format!("http://{}", addr))
            .with(init_cors(&config.cors_origins))
            .with(Tracing);

        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        tracing::info!("OpenAPI JSON at http://{}/openapi.json", addr);

        PoemServer::new(TcpListener::bind(&addr))
            .run_with_graceful_shutdown(
                app,
                shutdown_signal(),
                Some(config.server.shutdown_timeout),
            )
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM. A handler that fails to install never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
