// ABOUTME: Environment-based configuration for server binding and upstream LLM access
// ABOUTME: All configuration is read from environment variables with sensible defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! # Server Configuration
//!
//! Environment-only configuration, no config files. Every setting has a default
//! suitable for local development except the upstream API key, which is optional
//! at startup (the generation endpoint reports it through an error event when
//! missing, and `GET /api/config/check` exposes whether it is set).

use crate::errors::{AppError, AppResult};
use std::env;

/// Environment variable for the HTTP bind host
const HTTP_HOST_ENV: &str = "HTTP_HOST";

/// Environment variable for the HTTP port
const HTTP_PORT_ENV: &str = "HTTP_PORT";

/// Environment variable for the completion API base URL
const LLM_BASE_URL_ENV: &str = "LLM_BASE_URL";

/// Environment variable for the completion API key
const LLM_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable for the completion model
const LLM_MODEL_ENV: &str = "LLM_MODEL";

/// Environment variable for the sampling temperature
const LLM_TEMPERATURE_ENV: &str = "LLM_TEMPERATURE";

/// Environment variable for the completion token budget
const LLM_MAX_TOKENS_ENV: &str = "LLM_MAX_TOKENS";

/// Default bind host
const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default completion API base URL (OpenAI)
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completion model
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature for recipe generation
const DEFAULT_LLM_TEMPERATURE: f32 = 0.8;

/// Default max-token budget per batch completion
const DEFAULT_LLM_MAX_TOKENS: u32 = 2000;

/// Upstream completion API configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// API key (optional for local servers such as Ollama)
    pub api_key: Option<String>,
    /// Model identifier sent with every completion request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Max tokens generated per batch completion
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_owned(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_owned(),
            temperature: DEFAULT_LLM_TEMPERATURE,
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP bind host
    pub http_host: String,
    /// HTTP bind port
    pub http_port: u16,
    /// Upstream completion API settings
    pub llm: LlmConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: DEFAULT_HTTP_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a numeric variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        let http_host = env::var(HTTP_HOST_ENV).unwrap_or_else(|_| DEFAULT_HTTP_HOST.to_owned());
        let http_port = parse_env(HTTP_PORT_ENV, DEFAULT_HTTP_PORT)?;

        let llm = LlmConfig {
            base_url: env::var(LLM_BASE_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_owned()),
            api_key: env::var(LLM_API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            model: env::var(LLM_MODEL_ENV).unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_owned()),
            temperature: parse_env(LLM_TEMPERATURE_ENV, DEFAULT_LLM_TEMPERATURE)?,
            max_tokens: parse_env(LLM_MAX_TOKENS_ENV, DEFAULT_LLM_MAX_TOKENS)?,
        };

        Ok(Self {
            http_host,
            http_port,
            llm,
        })
    }

    /// One-line configuration summary for startup logging (never includes the key)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "bind={}:{}, llm_base_url={}, model={}, api_key={}",
            self.http_host,
            self.http_port,
            self.llm.base_url,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "configured"
            } else {
                "not set"
            }
        )
    }
}

/// Parse an environment variable, falling back to a default when unset
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("Invalid value for {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
        assert!(config.llm.api_key.is_none());
        assert!((config.llm.temperature - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_summary_masks_api_key() {
        let mut config = ServerConfig::default();
        config.llm.api_key = Some("sk-secret".to_owned());
        let summary = config.summary();
        assert!(summary.contains("api_key=configured"));
        assert!(!summary.contains("sk-secret"));
    }
}
