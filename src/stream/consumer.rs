// ABOUTME: Client-side consumer that reassembles recipe events from a chunked byte stream
// ABOUTME: Tracks suggestions, recipes in arrival order, and the terminal outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use tracing::warn;

use super::protocol::{decode_frame, FrameBuffer, RecipeStreamEvent, EVENT_MARKER};
use crate::errors::{AppError, AppResult};
use crate::models::Recipe;

/// Terminal outcome of a consumed stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Server signalled successful completion
    Complete,
    /// Server sent an error frame
    Failed(String),
}

/// Everything collected from one generation stream
#[derive(Debug, Clone, Default)]
pub struct StreamResult {
    /// Suggestions message, if one arrived
    pub suggestions: Option<String>,
    /// Recipes in arrival order
    pub recipes: Vec<Recipe>,
    /// Terminal outcome; `None` when the stream ended without a terminal event
    pub outcome: Option<StreamOutcome>,
}

/// Incremental consumer for the recipe event stream.
///
/// Feed it raw bytes as they arrive; it reassembles frames across chunk
/// boundaries, skips malformed frames with a warning, and stops decoding once
/// a terminal event has been seen. End of stream without a terminal event
/// leaves the outcome unset but keeps everything received so far.
#[derive(Debug, Default)]
pub struct RecipeStreamConsumer {
    frames: FrameBuffer,
    suggestions: Option<String>,
    recipes: Vec<Recipe>,
    outcome: Option<StreamOutcome>,
}

impl RecipeStreamConsumer {
    /// Create a consumer with an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, returning the events it completed
    pub fn feed_chunk(&mut self, chunk: &[u8]) -> Vec<RecipeStreamEvent> {
        let mut events = Vec::new();
        for block in self.frames.feed(chunk) {
            if self.outcome.is_some() {
                break;
            }
            if let Some(event) = self.decode_block(&block) {
                events.push(event);
            }
        }
        events
    }

    /// Signal end of stream, decoding any trailing unterminated frame
    pub fn finish(&mut self) -> StreamResult {
        if let Some(block) = self.frames.flush() {
            if self.outcome.is_none() {
                self.decode_block(&block);
            }
        }
        StreamResult {
            suggestions: self.suggestions.clone(),
            recipes: self.recipes.clone(),
            outcome: self.outcome.clone(),
        }
    }

    /// Number of recipes received so far
    #[must_use]
    pub fn recipes_received(&self) -> usize {
        self.recipes.len()
    }

    /// Whether a terminal event has been seen
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn decode_block(&mut self, block: &str) -> Option<RecipeStreamEvent> {
        // Non-data blocks (comments, other SSE fields) are not part of the
        // protocol and are skipped without complaint
        if !block.starts_with(EVENT_MARKER) {
            return None;
        }

        let event = match decode_frame(block) {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping malformed frame: {e}");
                return None;
            }
        };

        match &event {
            RecipeStreamEvent::Suggestions(text) => self.suggestions = Some(text.clone()),
            RecipeStreamEvent::Recipe(recipe) => self.recipes.push(recipe.clone()),
            RecipeStreamEvent::Complete => self.outcome = Some(StreamOutcome::Complete),
            RecipeStreamEvent::Error(message) => {
                self.outcome = Some(StreamOutcome::Failed(message.clone()));
            }
        }
        Some(event)
    }
}

/// Drive a consumer over a fallible byte stream, invoking `on_event` for each
/// decoded event in arrival order
///
/// # Errors
///
/// Returns a transport error when the underlying stream yields one. Events
/// received before the failure are lost to the caller except through
/// `on_event`.
pub async fn consume_stream<S, B, E>(
    stream: S,
    mut on_event: impl FnMut(&RecipeStreamEvent),
) -> AppResult<StreamResult>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    futures_util::pin_mut!(stream);

    let mut consumer = RecipeStreamConsumer::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::transport(format!("Stream read failed: {e}")))?;
        for event in consumer.feed_chunk(chunk.as_ref()) {
            on_event(&event);
        }
        if consumer.is_finished() {
            break;
        }
    }
    Ok(consumer.finish())
}

/// Consume a generation response body from an HTTP client
///
/// # Errors
///
/// Returns a transport error when reading the response body fails.
pub async fn consume_response(
    response: reqwest::Response,
    on_event: impl FnMut(&RecipeStreamEvent),
) -> AppResult<StreamResult> {
    consume_stream(response.bytes_stream(), on_event).await
}
