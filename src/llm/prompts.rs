// ABOUTME: Prompt construction for recipe batch generation
// ABOUTME: Builds the system instruction and per-batch user prompt with dietary rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

//! Prompt templates for recipe generation.
//!
//! The dietary restriction rules are enforced through the prompt only: the
//! model is instructed to drop incompatible ingredients before composing
//! recipes, and the server does not post-filter its output.

use crate::models::GenerateRecipesRequest;
use std::fmt::Write;

/// Forbidden and allowed ingredient rules per supported dietary restriction.
///
/// Matched case-insensitively against the restriction labels the client sends.
const RESTRICTION_RULES: &[(&str, &str, &str)] = &[
    (
        "halal",
        "pork, bacon, ham, sausage (unless explicitly halal), pepperoni, prosciutto, alcohol, wine, beer, liquor",
        "If any forbidden ingredient appears in the available ingredients list, ignore it completely. Only use halal-certified meat or clearly halal ingredients.",
    ),
    (
        "kosher",
        "pork, bacon, ham, shellfish, shrimp, crab, lobster, oysters, clams, mixing meat with dairy",
        "If any forbidden ingredient appears in the available ingredients list, ignore it completely. Only use kosher-certified ingredients.",
    ),
    (
        "vegan",
        "all meat, poultry, fish, dairy, eggs, honey, gelatin",
        "Ignore any animal products from the ingredients list.",
    ),
    (
        "vegetarian",
        "meat, poultry, fish",
        "Dairy and eggs are allowed.",
    ),
    (
        "gluten-free",
        "wheat, barley, rye, regular pasta, bread, flour",
        "Use gluten-free alternatives only.",
    ),
    (
        "dairy-free",
        "milk, cheese, yogurt, butter, cream, ice cream",
        "Use dairy-free alternatives.",
    ),
    (
        "keto",
        "sugar, bread, pasta, rice, potatoes, high-carb foods",
        "Focus on high-fat, low-carb ingredients.",
    ),
    (
        "paleo",
        "grains, legumes, dairy, processed foods, refined sugar",
        "Focus on whole, unprocessed foods.",
    ),
    (
        "nut-free",
        "all nuts, peanuts, almond, cashew, walnut, nut butters",
        "Exclude these from recipes completely.",
    ),
    (
        "low-carb",
        "bread, pasta, rice, sugar, starchy vegetables",
        "Focus on proteins and low-carb vegetables.",
    ),
];

/// System instruction sent with every batch completion
#[must_use]
pub fn recipe_system_prompt() -> &'static str {
    "You are a professional chef and nutritionist who creates personalized recipe \
     recommendations. You MUST strictly enforce ALL dietary restrictions - they are \
     non-negotiable religious, health, and ethical requirements. Filter out incompatible \
     ingredients before creating recipes. Always respond with valid JSON only, no \
     additional text."
}

/// Build the user prompt for one batch of recipes
#[must_use]
pub fn recipe_batch_prompt(request: &GenerateRecipesRequest, count: usize) -> String {
    let goal_info = request
        .main_goal
        .as_deref()
        .filter(|g| !g.is_empty())
        .map(|g| format!("Main goal: {g}. "))
        .unwrap_or_default();

    let dietary_info = if request.dietary_restrictions.is_empty() {
        String::new()
    } else {
        format!(
            "Dietary restrictions: {}. ",
            request.dietary_restrictions.join(", ")
        )
    };

    let meal_info = request
        .meal_type
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| format!("Meal type: {m}. "))
        .unwrap_or_default();

    let mut prompt = format!(
        "You are a professional chef and nutritionist. Generate exactly {count} diverse \
         recipe suggestions based on the following:\n\n\
         Ingredients available: {}\n\
         {goal_info}{dietary_info}{meal_info}\n",
        request.ingredients.join(", ")
    );

    if !request.dietary_restrictions.is_empty() {
        prompt.push_str(
            "\nCRITICAL DIETARY RESTRICTIONS - HIGHEST PRIORITY - MUST BE ENFORCED:\n\
             THESE RULES OVERRIDE EVERYTHING ELSE AND MUST BE FOLLOWED ABSOLUTELY:\n",
        );
        for (label, forbidden, guidance) in RESTRICTION_RULES {
            let _ = write!(
                prompt,
                "\n- If dietary restrictions include \"{label}\":\n  \
                 FORBIDDEN INGREDIENTS: {forbidden}\n  \
                 {guidance}\n"
            );
        }
        prompt.push_str(
            "\nENFORCEMENT: Before creating any recipe, filter out all incompatible \
             ingredients from the available list. Only use compatible ingredients that \
             meet ALL dietary restrictions.\n",
        );
    }

    prompt.push_str(
        "\nIMPORTANT: Create recipes using ONLY the compatible ingredients from the \
         available list that meet ALL dietary requirements. Aim for 85-100% match with \
         COMPATIBLE ingredients only.\n\n\
         For each recipe, provide:\n\
         1. A creative, appetizing name\n\
         2. A brief description (1-2 sentences)\n\
         3. Prep time (in minutes)\n\
         4. Cook time (in minutes)\n\
         5. Number of servings\n\
         6. Difficulty level (Easy, Medium, or Hard)\n\
         7. Match percentage (how well it uses the available COMPATIBLE ingredients, \
         0-100) - Aim for 85-100%\n\
         8. List of ingredients from the available ingredients that are used (MUST be \
         compatible with ALL dietary restrictions)\n\
         9. List of 3-5 additional common ingredients needed (keep minimal - only \
         essentials, and MUST comply with ALL dietary restrictions)\n\
         10. Estimated calories per serving\n\
         11. Estimated protein in grams per serving\n\
         12. Brief cooking instructions (3-5 steps)\n\n\
         Format your response as a valid JSON object with this exact structure:\n\
         {\n\
           \"recipes\": [\n\
             {\n\
               \"name\": \"Recipe Name\",\n\
               \"description\": \"Brief description\",\n\
               \"prepTime\": \"15 min\",\n\
               \"cookTime\": \"25 min\",\n\
               \"servings\": 4,\n\
               \"difficulty\": \"Easy\",\n\
               \"matchPercentage\": 92,\n\
               \"usedIngredients\": [\"ingredient1\", \"ingredient2\"],\n\
               \"additionalIngredients\": [\"ingredient3\", \"ingredient4\"],\n\
               \"calories\": 420,\n\
               \"protein\": 35,\n\
               \"instructions\": [\"Step 1\", \"Step 2\", \"Step 3\"]\n\
             }\n\
           ]\n\
         }\n\n\
         FINAL REMINDER: Dietary restrictions are MANDATORY and NON-NEGOTIABLE. Filter \
         incompatible ingredients FIRST, then create recipes with what remains!",
    );

    prompt
}
