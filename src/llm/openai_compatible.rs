// ABOUTME: OpenAI-compatible chat completion client used for recipe generation
// ABOUTME: Works with OpenAI, Groq, Ollama, and any API speaking the same protocol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::environment::LlmConfig;
use crate::errors::{AppError, ErrorCode};

/// Connection timeout for establishing the upstream connection
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Total request timeout; batch completions can take a while on slow models
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Configuration for an OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL of the API (e.g., "<https://api.openai.com/v1>")
    pub base_url: String,
    /// API key, omitted for local servers that do not require auth
    pub api_key: Option<String>,
    /// Default model when the request does not name one
    pub default_model: String,
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
        }
    }
}

/// Chat completion provider for OpenAI-compatible APIs
pub struct OpenAiCompatibleProvider {
    config: OpenAiCompatibleConfig,
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider instance
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client cannot be built.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create a provider from the server's LLM configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client cannot be built.
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, AppError> {
        Self::new(OpenAiCompatibleConfig::from(config))
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn add_auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<OpenAiErrorResponse>(&body)
            .map_or_else(|_| body.clone(), |parsed| parsed.error.message);

        warn!(
            provider = self.name(),
            status = status.as_u16(),
            "Upstream completion request failed: {message}"
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Authentication failed: {message}"),
            ),
            StatusCode::TOO_MANY_REQUESTS => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("Rate limited by upstream API: {message}"),
            ),
            StatusCode::NOT_FOUND => AppError::external_service(
                self.display_name(),
                format!("Model or endpoint not found: {message}"),
            ),
            StatusCode::SERVICE_UNAVAILABLE => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Upstream API unavailable: {message}"),
            ),
            _ => AppError::external_service(
                self.display_name(),
                format!("HTTP {status}: {message}"),
            ),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai_compatible"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI-compatible API"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE | LlmCapabilities::STREAMING
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());

        let body = OpenAiRequest {
            model: model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| OpenAiMessage {
                    role: m.role.as_str().to_owned(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            provider = self.name(),
            model = %model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .add_auth_header(self.client.post(self.api_url("chat/completions")))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(
                    self.display_name(),
                    format!("Request failed: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(self.parse_error_response(response).await);
        }

        let parsed: OpenAiResponse = response.json().await.map_err(|e| {
            AppError::upstream_invalid(format!("Failed to parse completion response: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::upstream_invalid("Completion response contained no choices"))?;

        Ok(ChatResponse {
            content: choice.message.content,
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .add_auth_header(self.client.get(self.api_url("models")))
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(
                    self.display_name(),
                    format!("Health check failed: {e}"),
                )
            })?;

        Ok(response.status().is_success())
    }
}

// Wire types for the OpenAI chat completion protocol

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider(base_url: &str, api_key: Option<&str>) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
            base_url: base_url.to_owned(),
            api_key: api_key.map(ToOwned::to_owned),
            default_model: "gpt-4o-mini".to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn test_api_url_joins_without_double_slash() {
        let provider = test_provider("https://api.openai.com/v1/", Some("sk-test"));
        assert_eq!(
            provider.api_url("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );

        let no_trailing = test_provider("http://localhost:11434/v1", None);
        assert_eq!(
            no_trailing.api_url("models"),
            "http://localhost:11434/v1/models"
        );
    }

    #[test]
    fn test_request_serialization_omits_unset_fields() {
        let body = OpenAiRequest {
            model: "gpt-4o-mini".to_owned(),
            messages: vec![OpenAiMessage {
                role: "user".to_owned(),
                content: "hello".to_owned(),
            }],
            temperature: None,
            max_tokens: None,
        };

        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let parsed: OpenAiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key provided");
    }
}
