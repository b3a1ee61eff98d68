// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Bundles configuration, the LLM provider, and the storage backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use std::sync::Arc;

use crate::config::environment::ServerConfig;
use crate::generation::BatchGenerator;
use crate::llm::LlmProvider;
use crate::storage::KeyValueStore;

/// Dependency container shared across route handlers as axum state
pub struct ServerResources {
    /// Server configuration
    pub config: ServerConfig,
    /// Upstream completion provider
    pub provider: Arc<dyn LlmProvider>,
    /// Key-value store for liked recipes and feedback
    pub store: Arc<dyn KeyValueStore>,
    /// Batch generator wired to the provider
    pub generator: Arc<BatchGenerator>,
}

impl ServerResources {
    /// Assemble the resource container
    #[must_use]
    pub fn new(
        config: ServerConfig,
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let generator = Arc::new(BatchGenerator::new(provider.clone(), &config.llm));
        Self {
            config,
            provider,
            store,
            generator,
        }
    }
}
