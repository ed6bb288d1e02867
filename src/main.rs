use search_portal::{
    config::Config,
    search::SearchGateway,
    telemetry::{init_tracing, LogOutput},
    web::{build_router, AppState},
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(&config.observability, LogOutput::Stdout);

    tracing::info!("Starting search portal v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        endpoint = %config.service.base_url(),
        index = %config.service.index_name,
        api_version = %config.service.api_version,
        "Search service"
    );

    let gateway = Arc::new(SearchGateway::new(&config.service)?);

    let app_state = AppState::new(
        gateway,
        &config.service.index_name,
        &config.service.api_version,
    )
    .with_static_dir(config.server.static_dir.clone());

    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP server listening on http://{}", http_addr);
    tracing::info!("   Search: http://{}/search?search=<terms>", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
