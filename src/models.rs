// ABOUTME: Domain data structures for recipes, generation requests, and feedback
// ABOUTME: Wire representations use camelCase field names throughout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! Shared domain models.
//!
//! A [`RawRecipe`] is what the completion API returns inside its `recipes`
//! array. The orchestrator turns it into a [`Recipe`] by assigning a stable
//! `id` (1..6 in emission order) and a presentation `gradient`. Recipes are
//! immutable once emitted.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Storage key prefix for liked recipes
pub const LIKED_RECIPE_PREFIX: &str = "liked_recipe_";

/// Storage key prefix for feedback entries
pub const FEEDBACK_PREFIX: &str = "feedback_";

/// Recipe difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A fully assembled recipe as streamed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable id, unique within one generation response (1..6 in emission order)
    pub id: u32,
    /// Recipe name
    pub name: String,
    /// One or two sentence description
    pub description: String,
    /// Preparation time, free-form (e.g. "15 min")
    pub prep_time: String,
    /// Cooking time, free-form
    pub cook_time: String,
    /// Number of servings
    pub servings: u32,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Model-estimated overlap with the available ingredients, 0-100
    pub match_percentage: u8,
    /// Available ingredients the recipe uses
    pub used_ingredients: Vec<String>,
    /// Additional common ingredients needed
    pub additional_ingredients: Vec<String>,
    /// Estimated calories per serving
    pub calories: u32,
    /// Estimated protein in grams per serving
    pub protein: u32,
    /// Cooking instructions, one step per entry
    pub instructions: Vec<String>,
    /// Presentation token, assigned round-robin from a fixed palette
    pub gradient: String,
}

/// A recipe as returned by the completion API, before id and gradient assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub match_percentage: u8,
    pub used_ingredients: Vec<String>,
    pub additional_ingredients: Vec<String>,
    pub calories: u32,
    pub protein: u32,
    pub instructions: Vec<String>,
}

impl RawRecipe {
    /// Assemble the streamable recipe by attaching the orchestrator-assigned
    /// id and gradient
    #[must_use]
    pub fn into_recipe(self, id: u32, gradient: &str) -> Recipe {
        Recipe {
            id,
            name: self.name,
            description: self.description,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            match_percentage: self.match_percentage,
            used_ingredients: self.used_ingredients,
            additional_ingredients: self.additional_ingredients,
            calories: self.calories,
            protein: self.protein,
            instructions: self.instructions,
            gradient: gradient.to_owned(),
        }
    }
}

/// Client request to generate recipes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipesRequest {
    /// Available ingredients; must contain at least one non-empty entry
    pub ingredients: Vec<String>,
    /// Main dietary goal (e.g. "weight loss")
    #[serde(default)]
    pub main_goal: Option<String>,
    /// Active dietary restrictions (e.g. "Vegan", "Gluten-Free")
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Meal type (e.g. "dinner")
    #[serde(default)]
    pub meal_type: Option<String>,
}

impl GenerateRecipesRequest {
    /// Validate the request before any upstream call is made
    ///
    /// # Errors
    ///
    /// Returns a validation error when `ingredients` has no non-empty entry.
    pub fn validate(&self) -> AppResult<()> {
        if self.ingredients.iter().any(|i| !i.trim().is_empty()) {
            Ok(())
        } else {
            Err(AppError::missing_field("ingredients"))
        }
    }
}

/// A single feedback submission, append-only once stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    /// Star rating, 1-5, absent when the user left text only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Free-form feedback text, may be empty
    #[serde(default)]
    pub feedback: String,
    /// ISO-8601 submission timestamp
    pub timestamp: String,
}

/// Derive the storage key for a liked recipe from its name
///
/// Normalization: lowercase, every character outside `[a-z0-9]` becomes `_`.
#[must_use]
pub fn liked_recipe_key(name: &str) -> String {
    let normalized: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{LIKED_RECIPE_PREFIX}{normalized}")
}

/// Derive the storage key for a feedback entry from its submission time
#[must_use]
pub fn feedback_key(epoch_millis: i64) -> String {
    format!("{FEEDBACK_PREFIX}{epoch_millis}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liked_recipe_key_normalization() {
        assert_eq!(
            liked_recipe_key("Chicken Rice Bowl"),
            "liked_recipe_chicken_rice_bowl"
        );
        assert_eq!(
            liked_recipe_key("Mac & Cheese!"),
            "liked_recipe_mac___cheese_"
        );
        assert_eq!(liked_recipe_key("Pho75"), "liked_recipe_pho75");
    }

    #[test]
    fn test_validate_rejects_empty_ingredients() {
        let request = GenerateRecipesRequest::default();
        assert!(request.validate().is_err());

        let blank = GenerateRecipesRequest {
            ingredients: vec![String::new(), "   ".to_owned()],
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let valid = GenerateRecipesRequest {
            ingredients: vec!["chicken".to_owned()],
            ..Default::default()
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_recipe_wire_field_names() {
        let recipe = Recipe {
            id: 1,
            name: "Test".to_owned(),
            description: "desc".to_owned(),
            prep_time: "10 min".to_owned(),
            cook_time: "20 min".to_owned(),
            servings: 2,
            difficulty: Difficulty::Easy,
            match_percentage: 90,
            used_ingredients: vec!["rice".to_owned()],
            additional_ingredients: vec!["salt".to_owned()],
            calories: 400,
            protein: 20,
            instructions: vec!["Cook".to_owned()],
            gradient: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_owned(),
        };

        let json = serde_json::to_string(&recipe).unwrap();
        assert!(json.contains("\"prepTime\""));
        assert!(json.contains("\"matchPercentage\""));
        assert!(json.contains("\"usedIngredients\""));
        assert!(json.contains("\"difficulty\":\"Easy\""));
    }

    #[test]
    fn test_raw_recipe_assembly() {
        let raw: RawRecipe = serde_json::from_value(serde_json::json!({
            "name": "Fried Rice",
            "description": "Quick weeknight fried rice.",
            "prepTime": "10 min",
            "cookTime": "15 min",
            "servings": 4,
            "difficulty": "Medium",
            "matchPercentage": 92,
            "usedIngredients": ["rice", "egg"],
            "additionalIngredients": ["soy sauce"],
            "calories": 420,
            "protein": 18,
            "instructions": ["Cook rice", "Fry everything"]
        }))
        .unwrap();

        let recipe = raw.into_recipe(4, "gradient-token");
        assert_eq!(recipe.id, 4);
        assert_eq!(recipe.gradient, "gradient-token");
        assert_eq!(recipe.difficulty, Difficulty::Medium);
    }
}
