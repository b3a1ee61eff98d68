// ABOUTME: Key-value storage abstraction for liked recipes and feedback
// ABOUTME: Pluggable backends behind one async trait; in-memory backend provided
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! # Key-Value Storage
//!
//! Small JSON-document store. Operations are independent and last-write-wins;
//! there are no transactions. Prefix scans back the liked-recipe and feedback
//! listings.

pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;

/// Storage backend contract
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Fetch every value whose key starts with `prefix`, ordered by key
    async fn get_by_prefix(&self, prefix: &str) -> AppResult<Vec<Value>>;
}
