// ABOUTME: Single-batch recipe generation through one chat completion call
// ABOUTME: Handles code-fence stripping, JSON parsing, and shape validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::environment::LlmConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{GenerateRecipesRequest, RawRecipe};

/// Generates one batch of recipes per completion call.
///
/// Stateless apart from its provider handle; safe to share across requests.
pub struct BatchGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl BatchGenerator {
    /// Create a generator backed by the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Generate one batch of `count` recipes
    ///
    /// Makes exactly one upstream call with no retries. The model is asked for
    /// a bare JSON document but frequently wraps it in Markdown code fences,
    /// which are stripped before parsing.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the completion call fails, a parse error
    /// when the output is not valid JSON, and a schema error when the document
    /// lacks a `recipes` array.
    pub async fn generate_batch(
        &self,
        request: &GenerateRecipesRequest,
        count: usize,
    ) -> AppResult<Vec<RawRecipe>> {
        let chat_request = ChatRequest::new(vec![
            ChatMessage::system(prompts::recipe_system_prompt()),
            ChatMessage::user(prompts::recipe_batch_prompt(request, count)),
        ])
        .with_model(self.model.clone())
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens);

        let response = self.provider.complete(&chat_request).await?;

        debug!(
            model = %response.model,
            content_len = response.content.len(),
            "Received completion for recipe batch"
        );

        let recipes = parse_recipe_batch(&response.content)?;
        info!(count = recipes.len(), "Parsed recipe batch");
        Ok(recipes)
    }
}

/// Parse the completion output into a recipe batch
///
/// # Errors
///
/// Returns an error when the content is not JSON or has no `recipes` array.
fn parse_recipe_batch(content: &str) -> AppResult<Vec<RawRecipe>> {
    let cleaned = strip_code_fences(content);

    let document: serde_json::Value = serde_json::from_str(&cleaned).map_err(|e| {
        AppError::upstream_invalid(format!("Failed to parse completion output as JSON: {e}"))
    })?;

    let recipes = document
        .get("recipes")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| {
            AppError::schema_violation("Response does not contain a valid recipes array")
        })?;

    recipes
        .iter()
        .map(|value| {
            let mut recipe: RawRecipe = serde_json::from_value(value.clone()).map_err(|e| {
                AppError::schema_violation(format!("Recipe entry has invalid shape: {e}"))
            })?;
            // The model occasionally overshoots the 0-100 range
            recipe.match_percentage = recipe.match_percentage.min(100);
            Ok(recipe)
        })
        .collect()
}

/// Remove Markdown code fences the model wraps around JSON output
fn strip_code_fences(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_owned()
}
