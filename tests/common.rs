// ABOUTME: Shared test fixtures: scripted LLM provider and resource builders
// ABOUTME: Lets pipeline and route tests run without any network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use plateful_server::config::environment::ServerConfig;
use plateful_server::errors::{AppError, ErrorCode};
use plateful_server::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use plateful_server::models::GenerateRecipesRequest;
use plateful_server::resources::ServerResources;
use plateful_server::storage::InMemoryStore;

/// One scripted completion outcome: raw content or a failure
pub enum ScriptedOutcome {
    Content(String),
    Failure(ErrorCode, String),
}

/// Provider that replays a fixed sequence of completion outcomes
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<ScriptedOutcome>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(outcomes: Vec<ScriptedOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completion calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted test provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedProvider ran out of outcomes");

        match outcome {
            ScriptedOutcome::Content(content) => Ok(ChatResponse {
                content,
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            ScriptedOutcome::Failure(code, message) => Err(AppError::new(code, message)),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Build a valid batch completion payload with the given recipe names
pub fn batch_content(names: &[&str]) -> String {
    let recipes: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "description": "A quick test dish.",
                "prepTime": "10 min",
                "cookTime": "20 min",
                "servings": 2,
                "difficulty": "Easy",
                "matchPercentage": 91,
                "usedIngredients": ["rice", "egg"],
                "additionalIngredients": ["salt"],
                "calories": 420,
                "protein": 18,
                "instructions": ["Prep", "Cook", "Serve"]
            })
        })
        .collect();
    serde_json::json!({ "recipes": recipes }).to_string()
}

/// A generation request with enough ingredients for the generic suggestions text
pub fn sample_request() -> GenerateRecipesRequest {
    GenerateRecipesRequest {
        ingredients: vec!["rice".to_owned(), "egg".to_owned(), "chicken".to_owned()],
        main_goal: None,
        dietary_restrictions: Vec::new(),
        meal_type: Some("dinner".to_owned()),
    }
}

/// Test configuration pointing at a local endpoint (no API key requirement)
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.llm.base_url = "http://localhost:11434/v1".to_owned();
    config.llm.api_key = Some("sk-test-key-1234".to_owned());
    config
}

/// Assemble server resources around a scripted provider
pub fn create_test_resources(provider: Arc<ScriptedProvider>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        test_config(),
        provider,
        Arc::new(InMemoryStore::new()),
    ))
}
