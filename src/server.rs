// ABOUTME: HTTP server assembly: router construction, middleware, and serving
// ABOUTME: Merges route groups and binds the configured listener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, RecipeRoutes};

/// The Plateful HTTP server
pub struct PlatefulServer {
    resources: Arc<ServerResources>,
}

impl PlatefulServer {
    /// Create a server over the given resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(RecipeRoutes::routes(self.resources.clone()))
            .merge(HealthRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind the configured address and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error when binding or serving fails.
    pub async fn run(self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.resources.config.http_host, self.resources.config.http_port
        );
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
