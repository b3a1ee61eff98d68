// ABOUTME: Recipe generation pipeline: batch completion calls and stream orchestration
// ABOUTME: Turns a generation request into an ordered sequence of wire events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! # Recipe Generation Pipeline
//!
//! Two layers: [`batch::BatchGenerator`] makes one completion call and parses
//! the returned recipe batch, and [`orchestrator`] sequences two such calls
//! into the event stream the client consumes.

pub mod batch;
pub mod orchestrator;

pub use batch::BatchGenerator;
pub use orchestrator::{recipe_event_stream, GRADIENT_PALETTE, RECIPES_PER_BATCH, TOTAL_BATCHES};
