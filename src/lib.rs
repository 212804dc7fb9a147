pub mod api;
pub mod core;
pub mod providers;
pub mod service;
pub mod store;

use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::{debug, info};

/// Wires the rate provider, the history and the HTTP routes for `config`.
pub fn build_app(config: &AppConfig) -> Router {
    let provider =
        providers::exchange_rate_api::ExchangeRateApiProvider::new(config.exchange_rate_base_url());
    let history = store::QuoteHistory::new();
    let service = service::QuoteService::new(Arc::new(provider), history);
    api::app_router(Arc::new(service))
}

/// Resolves the configuration. CLI port beats `PORT`, which beats the file.
pub fn load_config(config_path: Option<&str>, port: Option<u16>) -> Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env()?;
    if let Some(port) = port {
        config.server.port = port;
    }
    Ok(config)
}

pub async fn run(config_path: Option<&str>, port: Option<u16>) -> Result<()> {
    info!("Quote service starting...");

    let config = load_config(config_path, port)?;
    debug!("Loaded config: {config:#?}");

    let addr = config.listen_addr()?;
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let port = listener.local_addr()?.port();
    info!("Servidor rodando na porta {port}");
    info!("Informações sobre a API: http://localhost:{port}/");
    info!("Teste o servidor em: http://localhost:{port}/teste");
    info!("Consulte cotações em: http://localhost:{port}/cotacao");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Quote service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
