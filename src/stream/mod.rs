// ABOUTME: Wire protocol and client-side consumer for the recipe event stream
// ABOUTME: SSE-framed JSON events shared by the server routes and the consumer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! # Recipe Event Stream
//!
//! [`protocol`] defines the frame format and event encoding used on the wire;
//! [`consumer`] reassembles arbitrarily chunked bytes back into events on the
//! client side.

pub mod consumer;
pub mod protocol;

pub use consumer::{consume_response, consume_stream, RecipeStreamConsumer, StreamOutcome, StreamResult};
pub use protocol::{FrameBuffer, RecipeStreamEvent, EVENT_MARKER, FRAME_TERMINATOR};
