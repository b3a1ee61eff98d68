// ABOUTME: Liveness and configuration inspection endpoints
// ABOUTME: Reports service status and whether the upstream API key is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::resources::ServerResources;

/// Masked key prefix length shown by the config check
const KEY_PREFIX_LEN: usize = 7;

/// Health and diagnostics route group
pub struct HealthRoutes;

impl HealthRoutes {
    /// Build the health router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/config/check", get(config_check))
            .with_state(resources)
    }
}

/// `GET /health` — liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/config/check` — report API key presence without revealing it
async fn config_check(
    State(resources): State<Arc<ServerResources>>,
) -> Json<serde_json::Value> {
    let api_key = resources.config.llm.api_key.as_deref();

    let key_prefix = api_key.map_or_else(
        || "not set".to_owned(),
        |key| format!("{}...", key.chars().take(KEY_PREFIX_LEN).collect::<String>()),
    );

    Json(json!({
        "hasApiKey": api_key.is_some(),
        "keyLength": api_key.map_or(0, str::len),
        "keyPrefix": key_prefix,
    }))
}
