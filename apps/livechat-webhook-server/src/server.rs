//! HTTP server

use anyhow::{Context, Result};
use axum::{http::StatusCode, routing::get, Router};
use livechat_webhooks::{webhook_router, Configuration};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::settings::ServerConfig;

pub struct Server {
    config: ServerConfig,
    webhooks: Configuration,
}

impl Server {
    pub fn new(config: ServerConfig, webhooks: Configuration) -> Self {
        Self { config, webhooks }
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_address();
        let app = build_router(&self.config.path, self.webhooks);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Webhook server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}

pub fn build_router(path: &str, webhooks: Configuration) -> Router {
    webhook_router(path, webhooks)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
