// ABOUTME: Sequential dual-batch stream orchestration for recipe generation
// ABOUTME: Emits suggestions, then per-recipe events across two batches, then a terminal event
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! Orders the generation pipeline into a single event stream.
//!
//! Event sequence invariant: `[suggestions?] [recipe]* [complete | error]`,
//! exactly one terminal event, recipe ids strictly increasing. Batches run
//! strictly sequentially; a batch failure ends the stream with an error event
//! but recipes already emitted remain valid on the client.

use futures_util::Stream;
use std::sync::Arc;
use tracing::{error, info};

use crate::generation::BatchGenerator;
use crate::models::GenerateRecipesRequest;
use crate::stream::RecipeStreamEvent;

/// Recipes requested per completion call
pub const RECIPES_PER_BATCH: usize = 3;

/// Number of sequential completion calls per generation request
pub const TOTAL_BATCHES: usize = 2;

/// Presentation gradients assigned round-robin by global recipe index
pub const GRADIENT_PALETTE: [&str; 6] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #30cfd0 0%, #330867 100%)",
];

/// Suggestions message emitted before the first batch
#[must_use]
pub fn suggestions_for(ingredients: &[String]) -> &'static str {
    if ingredients.len() < 3 {
        "Your ingredients are a great start! Consider adding proteins like chicken or \
         tofu, and fresh vegetables to unlock even more delicious recipe possibilities."
    } else {
        "Your ingredients make a great base! These recipes maximize what you have. \
         Consider adding complementary items like fresh herbs or spices to elevate \
         your dishes."
    }
}

/// Ordinal label used in batch error messages
const fn batch_label(batch: usize) -> &'static str {
    match batch {
        0 => "First",
        _ => "Second",
    }
}

/// Produce the full event stream for one generation request
///
/// Validation failures and batch errors surface as error events on the stream
/// rather than HTTP statuses; by the time the first batch fails the response
/// status has already been sent.
pub fn recipe_event_stream(
    generator: Arc<BatchGenerator>,
    request: GenerateRecipesRequest,
) -> impl Stream<Item = RecipeStreamEvent> + Send {
    async_stream::stream! {
        if let Err(e) = request.validate() {
            error!("Rejected generation request: {e}");
            yield RecipeStreamEvent::Error("No ingredients provided".to_owned());
            return;
        }

        info!(
            ingredients = request.ingredients.len(),
            restrictions = request.dietary_restrictions.len(),
            "Starting recipe generation"
        );

        yield RecipeStreamEvent::Suggestions(suggestions_for(&request.ingredients).to_owned());

        for batch in 0..TOTAL_BATCHES {
            match generator.generate_batch(&request, RECIPES_PER_BATCH).await {
                Ok(recipes) => {
                    info!(batch = batch + 1, count = recipes.len(), "Batch complete");
                    for (i, raw) in recipes.into_iter().enumerate() {
                        let index = batch * RECIPES_PER_BATCH + i;
                        let id = u32::try_from(index + 1).unwrap_or(u32::MAX);
                        let gradient = GRADIENT_PALETTE[index % GRADIENT_PALETTE.len()];
                        yield RecipeStreamEvent::Recipe(raw.into_recipe(id, gradient));
                    }
                }
                Err(e) => {
                    error!(batch = batch + 1, "Batch failed: {e}");
                    yield RecipeStreamEvent::Error(format!(
                        "{} batch error: {e}",
                        batch_label(batch)
                    ));
                    return;
                }
            }
        }

        info!("Recipe generation complete");
        yield RecipeStreamEvent::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_text_depends_on_ingredient_count() {
        let few = vec!["rice".to_owned(), "egg".to_owned()];
        assert!(suggestions_for(&few).contains("great start"));

        let many = vec!["rice".to_owned(), "egg".to_owned(), "chicken".to_owned()];
        assert!(suggestions_for(&many).contains("great base"));
    }

    #[test]
    fn test_gradient_palette_wraps_around() {
        // Global indices 0..5 map onto distinct palette entries; index 6 wraps
        let first = GRADIENT_PALETTE[0 % GRADIENT_PALETTE.len()];
        let wrapped = GRADIENT_PALETTE[6 % GRADIENT_PALETTE.len()];
        assert_eq!(first, wrapped);
        assert_eq!(GRADIENT_PALETTE.len(), 6);
    }
}
