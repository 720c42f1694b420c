use std::sync::Arc;

use anyhow::Context;
use core_smx::{JsonFileSource, SitemapService, setup_logging};

use api_smx::{ServerConfig, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if it exists
    dotenvy::dotenv().ok();

    setup_logging("api_smx=debug,core_smx=debug,tower_http=debug");

    let config = ServerConfig::from_env()?;

    let source = Arc::new(JsonFileSource::new(&config.urls_file));
    let service = SitemapService::new(source, &config.base_url, config.options.clone())
        .with_context(|| format!("Invalid sitemap configuration for base '{}'", config.base_url))?;

    let app = routes::router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", config.addr))?;

    tracing::info!(
        address = %config.addr,
        base = %config.base_url,
        urls_file = %config.urls_file.display(),
        size = config.options.size,
        max_age_secs = config.options.max_age.as_secs(),
        "Serving sitemaps"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
