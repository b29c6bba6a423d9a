// ABOUTME: Recipe models: the owned recipe row, ingredient pairings, and read views
// ABOUTME: List/detail projections embed area, owner, and category summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-owned recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Preparation instructions
    pub instructions: Option<String>,
    /// Thumbnail location under `/public/recipes/`
    pub thumb: Option<String>,
    /// Free-form preparation time, e.g. "45 min"
    pub time: Option<String>,
    /// Category the recipe belongs to
    pub category_id: Uuid,
    /// Optional cuisine area
    pub area_id: Option<Uuid>,
    /// Owning user
    pub owner_id: Uuid,
    /// When the recipe was created
    pub created_at: DateTime<Utc>,
    /// When the recipe was last updated
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Preparation instructions
    pub instructions: Option<String>,
    /// Thumbnail location
    pub thumb: Option<String>,
    /// Free-form preparation time
    pub time: Option<String>,
    /// Category the recipe belongs to
    pub category_id: Uuid,
    /// Optional cuisine area
    pub area_id: Option<Uuid>,
}

impl Recipe {
    /// Create a new recipe owned by `owner_id`
    #[must_use]
    pub fn new(owner_id: Uuid, params: NewRecipe) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: params.title,
            description: params.description,
            instructions: params.instructions,
            thumb: params.thumb,
            time: params.time,
            category_id: params.category_id,
            area_id: params.area_id,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One ingredient pairing on a recipe, with its free-form measure text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Referenced ingredient
    pub ingredient_id: Uuid,
    /// Measure text, e.g. "2 tbsp"
    pub measure: Option<String>,
}

/// Embedded area summary on recipe views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSummary {
    /// Area identifier
    pub id: Uuid,
    /// Area name
    pub name: String,
}

/// Embedded owner summary on recipe views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSummary {
    /// Owner identifier
    pub id: Uuid,
    /// Owner display name
    pub name: String,
    /// Owner email
    pub email: String,
}

/// Embedded category summary on recipe views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category identifier
    pub id: Uuid,
    /// Category name
    pub name: String,
    /// Category thumbnail
    pub thumb: Option<String>,
}

/// Ingredient row on the recipe detail view, with the pairing measure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDetail {
    /// Ingredient identifier
    pub id: Uuid,
    /// Ingredient name
    pub name: String,
    /// Ingredient thumbnail
    pub thumb: Option<String>,
    /// Measure text from the pairing
    pub measure: Option<String>,
}

/// Recipe projection returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeListItem {
    /// Recipe identifier
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Thumbnail location
    pub thumb: Option<String>,
    /// Free-form preparation time
    pub time: Option<String>,
    /// When the recipe was created
    pub created_at: DateTime<Utc>,
    /// Cuisine area, when set
    pub area: Option<AreaSummary>,
    /// Owning user
    pub owner: OwnerSummary,
    /// Recipe category
    pub category: CategorySummary,
}

/// Full recipe returned by the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// Recipe identifier
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Preparation instructions
    pub instructions: Option<String>,
    /// Thumbnail location
    pub thumb: Option<String>,
    /// Free-form preparation time
    pub time: Option<String>,
    /// When the recipe was created
    pub created_at: DateTime<Utc>,
    /// When the recipe was last updated
    pub updated_at: DateTime<Utc>,
    /// Cuisine area, when set
    pub area: Option<AreaSummary>,
    /// Owning user
    pub owner: OwnerSummary,
    /// Recipe category
    pub category: CategorySummary,
    /// Ingredient pairings with measures
    pub ingredients: Vec<IngredientDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recipe_is_owned() {
        let owner = Uuid::new_v4();
        let category = Uuid::new_v4();
        let recipe = Recipe::new(
            owner,
            NewRecipe {
                title: "Chicken Curry".into(),
                description: Some("Spicy".into()),
                instructions: None,
                thumb: None,
                time: Some("45 min".into()),
                category_id: category,
                area_id: None,
            },
        );
        assert_eq!(recipe.owner_id, owner);
        assert_eq!(recipe.category_id, category);
        assert!(recipe.area_id.is_none());
    }
}
