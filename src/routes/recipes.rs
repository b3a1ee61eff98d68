// ABOUTME: Recipe API routes: SSE generation stream, liked recipes, and feedback
// ABOUTME: Generation errors surface as wire events; REST errors use the standard JSON shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures_util::{Stream, StreamExt};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::generation::recipe_event_stream;
use crate::models::{
    feedback_key, liked_recipe_key, FeedbackEntry, GenerateRecipesRequest, Recipe,
    FEEDBACK_PREFIX, LIKED_RECIPE_PREFIX,
};
use crate::resources::ServerResources;
use crate::stream::RecipeStreamEvent;

/// Recipe API route group
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Build the recipe router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/generate", post(generate_recipes))
            .route("/api/recipes/liked", get(list_liked_recipes))
            .route("/api/recipes/liked", post(save_liked_recipe))
            .route("/api/recipes/liked/:name", delete(remove_liked_recipe))
            .route("/api/feedback", post(submit_feedback))
            .route("/api/feedback", get(list_feedback))
            .with_state(resources)
    }
}

/// `POST /api/recipes/generate` — stream generated recipes as SSE events
async fn generate_recipes(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<GenerateRecipesRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = async_stream::stream! {
        // Hosted OpenAI always needs a key; local endpoints may not
        let key_required = resources.config.llm.base_url.contains("api.openai.com");
        if key_required && resources.config.llm.api_key.is_none() {
            let event = RecipeStreamEvent::Error("OpenAI API key not configured".to_owned());
            yield Ok(Event::default().data(event.to_wire_json()));
            return;
        }

        let events = recipe_event_stream(resources.generator.clone(), request);
        futures_util::pin_mut!(events);
        while let Some(event) = events.next().await {
            yield Ok::<_, Infallible>(Event::default().data(event.to_wire_json()));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// `GET /api/recipes/liked` — list all liked recipes
async fn list_liked_recipes(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<Json<serde_json::Value>> {
    let recipes = resources.store.get_by_prefix(LIKED_RECIPE_PREFIX).await?;
    info!(count = recipes.len(), "Fetched liked recipes");
    Ok(Json(json!({ "recipes": recipes })))
}

/// `POST /api/recipes/liked` — upsert a liked recipe keyed by normalized name
async fn save_liked_recipe(
    State(resources): State<Arc<ServerResources>>,
    Json(recipe): Json<Recipe>,
) -> AppResult<Json<serde_json::Value>> {
    let key = liked_recipe_key(&recipe.name);
    info!(recipe = %recipe.name, "Saving liked recipe");

    let value = serde_json::to_value(&recipe)
        .map_err(|e| AppError::storage(format!("Failed to serialize recipe: {e}")))?;
    resources.store.set(&key, value).await?;

    Ok(Json(json!({ "success": true, "message": "Recipe saved" })))
}

/// `DELETE /api/recipes/liked/:name` — remove one liked recipe
async fn remove_liked_recipe(
    State(resources): State<Arc<ServerResources>>,
    Path(name): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let key = liked_recipe_key(&name);
    info!(recipe = %name, "Removing liked recipe");
    resources.store.delete(&key).await?;

    Ok(Json(json!({ "success": true, "message": "Recipe removed" })))
}

/// `POST /api/feedback` — store a feedback entry keyed by submission time
async fn submit_feedback(
    State(resources): State<Arc<ServerResources>>,
    Json(entry): Json<FeedbackEntry>,
) -> AppResult<Json<serde_json::Value>> {
    let key = feedback_key(chrono::Utc::now().timestamp_millis());
    info!(rating = ?entry.rating, "Receiving feedback");

    let value = serde_json::to_value(&entry)
        .map_err(|e| AppError::storage(format!("Failed to serialize feedback: {e}")))?;
    resources.store.set(&key, value).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Thank you for your feedback!"
    })))
}

/// `GET /api/feedback` — list all feedback entries
async fn list_feedback(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<Json<serde_json::Value>> {
    let feedbacks = resources.store.get_by_prefix(FEEDBACK_PREFIX).await?;
    info!(count = feedbacks.len(), "Fetched feedback entries");
    Ok(Json(json!({ "feedbacks": feedbacks })))
}
