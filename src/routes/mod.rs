// ABOUTME: HTTP route definitions grouped by concern
// ABOUTME: Each group exposes a routes() constructor merged by the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

pub mod health;
pub mod recipes;

pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
