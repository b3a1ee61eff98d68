// ABOUTME: In-memory key-value backend over a concurrent map
// ABOUTME: Suitable for development and tests; data does not survive restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::KeyValueStore;
use crate::errors::AppResult;

/// In-memory store backed by a concurrent hash map
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, Value>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> AppResult<Vec<Value>> {
        // Sort by key so listings have a stable order
        let mut matches: Vec<(String, Value)> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matches.into_iter().map(|(_, value)| value).collect())
    }
}
