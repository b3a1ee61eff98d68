// ABOUTME: Configuration module for environment-driven server settings
// ABOUTME: Groups HTTP, LLM, and generation configuration under one namespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

/// Environment variable based configuration
pub mod environment;
