mod config;
mod dto;
mod fetcher;
mod handlers;
mod models;
mod service;
mod storage;

use tracing_subscriber::EnvFilter;

use std::{process::ExitCode, sync::Arc};

use service::NoteService;
use storage::WebDavStore;

#[tokio::main]
async fn main() -> ExitCode {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config; without WebDAV credentials there is nothing to upload to
    let cfg = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Refusing to start: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Successfully loaded note ingest config");

    // Setup remote store
    let store = match WebDavStore::new(&cfg.webdav) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Refusing to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Setup service
    let service = Arc::new(NoteService::new(&cfg, store));
    let router = handlers::router(service);

    // Start server
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", cfg.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            return ExitCode::FAILURE;
        }
    };

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Note ingest server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Listening on an unknown address: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
