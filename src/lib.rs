// ABOUTME: Main library entry point for the Plateful recipe suggestion platform
// ABOUTME: Provides streaming AI recipe generation, liked-recipe storage, and feedback collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

#![deny(unsafe_code)]

//! # Plateful Server
//!
//! A recipe-suggestion web service. Clients post their available ingredients and
//! dietary goals; the server asks an OpenAI-compatible completion API for recipes
//! in two sequential 3-recipe batches and streams each validated recipe to the
//! client over a Server-Sent Events connection as soon as it is available.
//!
//! ## Architecture
//!
//! - **`llm`**: Provider abstraction and the OpenAI-compatible completion client
//! - **`generation`**: Batch generation and the streaming orchestrator
//! - **`stream`**: Wire protocol for recipe events plus the client-side consumer
//! - **`storage`**: Pluggable key-value store for liked recipes and feedback
//! - **`routes`**: Axum HTTP handlers
//! - **`config`**: Environment-driven configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use plateful_server::config::environment::ServerConfig;
//! use plateful_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Plateful server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration management
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Recipe batch generation and the streaming orchestrator
pub mod generation;

/// LLM provider abstraction and the OpenAI-compatible completion client
pub mod llm;

/// Logging configuration and structured logging setup
pub mod logging;

/// Domain data structures shared across the server and client-side consumer
pub mod models;

/// Shared dependency bundle handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Key-value storage abstraction with pluggable backends
pub mod storage;

/// Recipe event wire protocol and the client-side stream consumer
pub mod stream;
