// ABOUTME: SSE-framed wire protocol for recipe stream events
// ABOUTME: Frame encoding/decoding and a byte buffer that reassembles frames from chunks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! Wire format: each event is one frame, `data: <json>\n\n`.
//!
//! Three event payloads carry a `type` tag (`suggestions`, `recipe`,
//! `complete`); the error payload is the bare object `{"error": "..."}` with
//! no tag. Decoders must check for the `error` key before dispatching on
//! `type`.

use serde_json::json;

use crate::errors::{AppError, AppResult};
use crate::models::Recipe;

/// Prefix of every event frame
pub const EVENT_MARKER: &str = "data: ";

/// Blank-line separator terminating each frame
pub const FRAME_TERMINATOR: &str = "\n\n";

/// One event on the recipe generation stream
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeStreamEvent {
    /// Ingredient suggestions message, emitted before any recipe
    Suggestions(String),
    /// One generated recipe
    Recipe(Recipe),
    /// Terminal success marker
    Complete,
    /// Terminal failure with a human-readable message
    Error(String),
}

impl RecipeStreamEvent {
    /// Serialize the event payload to its wire JSON
    #[must_use]
    pub fn to_wire_json(&self) -> String {
        let value = match self {
            Self::Suggestions(text) => json!({ "type": "suggestions", "data": text }),
            Self::Recipe(recipe) => json!({ "type": "recipe", "data": recipe }),
            Self::Complete => json!({ "type": "complete" }),
            Self::Error(message) => json!({ "error": message }),
        };
        value.to_string()
    }

    /// Parse an event from its wire JSON payload
    ///
    /// # Errors
    ///
    /// Returns a transport error when the payload is not JSON, carries an
    /// unknown `type`, or a `recipe` event has an invalid body.
    pub fn from_wire_json(payload: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| AppError::transport(format!("Event payload is not JSON: {e}")))?;

        // The error frame has no type tag; check it first
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return Ok(Self::Error(message.to_owned()));
        }

        match value.get("type").and_then(serde_json::Value::as_str) {
            Some("suggestions") => {
                let text = value
                    .get("data")
                    .and_then(serde_json::Value::as_str)
                    .ok_or_else(|| AppError::transport("Suggestions event missing data"))?;
                Ok(Self::Suggestions(text.to_owned()))
            }
            Some("recipe") => {
                let data = value
                    .get("data")
                    .cloned()
                    .ok_or_else(|| AppError::transport("Recipe event missing data"))?;
                let recipe: Recipe = serde_json::from_value(data)
                    .map_err(|e| AppError::transport(format!("Invalid recipe payload: {e}")))?;
                Ok(Self::Recipe(recipe))
            }
            Some("complete") => Ok(Self::Complete),
            Some(other) => Err(AppError::transport(format!("Unknown event type: {other}"))),
            None => Err(AppError::transport("Event has neither type nor error key")),
        }
    }

    /// Whether this event terminates the stream
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error(_))
    }

    /// Encode the event as a complete wire frame
    #[must_use]
    pub fn encode_frame(&self) -> String {
        format!("{EVENT_MARKER}{}{FRAME_TERMINATOR}", self.to_wire_json())
    }
}

/// Strip the frame marker and decode the payload
///
/// # Errors
///
/// Returns a transport error when the block does not start with the marker or
/// the payload does not decode.
pub fn decode_frame(block: &str) -> AppResult<RecipeStreamEvent> {
    let payload = block
        .strip_prefix(EVENT_MARKER)
        .ok_or_else(|| AppError::transport("Frame does not start with the data marker"))?;
    RecipeStreamEvent::from_wire_json(payload.trim())
}

/// Reassembles complete frames from arbitrarily chunked bytes.
///
/// Keeps a single running byte buffer and decodes text only once a block is
/// complete, so a chunk boundary inside a multi-byte UTF-8 character cannot
/// corrupt the payload. A trailing fragment without its terminator stays
/// buffered until more bytes arrive or [`Self::flush`] is called at end of
/// stream.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
}

impl FrameBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, returning every frame block completed by it
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut blocks = Vec::new();
        while let Some(pos) = find_terminator(&self.buffer) {
            let block: Vec<u8> = self
                .buffer
                .drain(..pos + FRAME_TERMINATOR.len())
                .collect();
            if let Some(text) = decode_block_bytes(&block) {
                blocks.push(text);
            }
        }
        blocks
    }

    /// Drain any trailing unterminated block at end of stream
    pub fn flush(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        decode_block_bytes(&rest)
    }
}

fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(FRAME_TERMINATOR.len())
        .position(|window| window == FRAME_TERMINATOR.as_bytes())
}

fn decode_block_bytes(block: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(block);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn sample_recipe(id: u32) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {id}"),
            description: "desc".to_owned(),
            prep_time: "10 min".to_owned(),
            cook_time: "20 min".to_owned(),
            servings: 2,
            difficulty: Difficulty::Easy,
            match_percentage: 90,
            used_ingredients: vec!["rice".to_owned()],
            additional_ingredients: vec!["salt".to_owned()],
            calories: 400,
            protein: 15,
            instructions: vec!["Cook".to_owned()],
            gradient: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_owned(),
        }
    }

    #[test]
    fn test_event_wire_round_trip() {
        let events = vec![
            RecipeStreamEvent::Suggestions("Add herbs.".to_owned()),
            RecipeStreamEvent::Recipe(sample_recipe(1)),
            RecipeStreamEvent::Complete,
            RecipeStreamEvent::Error("First batch error: boom".to_owned()),
        ];

        for event in events {
            let decoded = RecipeStreamEvent::from_wire_json(&event.to_wire_json()).unwrap();
            assert_eq!(decoded, event);
        }
    }

    #[test]
    fn test_error_frame_has_no_type_tag() {
        let wire = RecipeStreamEvent::Error("boom".to_owned()).to_wire_json();
        let value: serde_json::Value = serde_json::from_str(&wire).unwrap();
        assert!(value.get("type").is_none());
        assert_eq!(value.get("error").unwrap(), "boom");
    }

    #[test]
    fn test_frame_encoding() {
        let frame = RecipeStreamEvent::Complete.encode_frame();
        assert_eq!(frame, "data: {\"type\":\"complete\"}\n\n");
        assert_eq!(
            decode_frame(frame.trim_end()).unwrap(),
            RecipeStreamEvent::Complete
        );
    }

    #[test]
    fn test_decode_rejects_unknown_type_and_missing_marker() {
        assert!(decode_frame("event: ping").is_err());
        assert!(decode_frame("data: {\"type\":\"mystery\"}").is_err());
        assert!(decode_frame("data: not json").is_err());
    }

    #[test]
    fn test_frame_buffer_handles_partial_chunks() {
        let mut buffer = FrameBuffer::new();
        let frame = RecipeStreamEvent::Complete.encode_frame();
        let (left, right) = frame.split_at(9);

        assert!(buffer.feed(left.as_bytes()).is_empty());
        let blocks = buffer.feed(right.as_bytes());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], "data: {\"type\":\"complete\"}");
        assert!(buffer.flush().is_none());
    }

    #[test]
    fn test_frame_buffer_preserves_multibyte_chars_at_any_split() {
        let event = RecipeStreamEvent::Suggestions("Sauté the vegetables".to_owned());
        let frame = event.encode_frame();
        let bytes = frame.as_bytes();

        // A chunk boundary inside the two-byte `é` must not corrupt the payload
        for split in 1..bytes.len() {
            let mut buffer = FrameBuffer::new();
            let mut blocks = buffer.feed(&bytes[..split]);
            blocks.extend(buffer.feed(&bytes[split..]));

            assert_eq!(blocks.len(), 1, "split={split}");
            assert_eq!(decode_frame(&blocks[0]).unwrap(), event, "split={split}");
        }
    }

    #[test]
    fn test_frame_buffer_multiple_frames_in_one_chunk() {
        let mut buffer = FrameBuffer::new();
        let chunk = format!(
            "{}{}",
            RecipeStreamEvent::Suggestions("hi".to_owned()).encode_frame(),
            RecipeStreamEvent::Complete.encode_frame()
        );
        let blocks = buffer.feed(chunk.as_bytes());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_frame_buffer_flush_returns_trailing_fragment() {
        let mut buffer = FrameBuffer::new();
        assert!(buffer.feed(b"data: {\"type\":\"complete\"}").is_empty());
        assert_eq!(buffer.flush().unwrap(), "data: {\"type\":\"complete\"}");
        assert!(buffer.flush().is_none());
    }
}
