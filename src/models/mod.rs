// ABOUTME: Domain model organization for the Foodies API
// ABOUTME: Users, recipes with ingredient pairings, and static lookup rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Common data models shared by the routes and database layers.

/// Lookup table rows: areas, categories, ingredients, testimonials
pub mod lookup;
/// Recipe models and read views
pub mod recipe;
/// User account models and public profile views
pub mod user;

pub use lookup::{Area, Category, Ingredient, Testimonial};
pub use recipe::{
    AreaSummary, CategorySummary, IngredientDetail, NewRecipe, OwnerSummary, Recipe, RecipeDetail,
    RecipeIngredient, RecipeListItem,
};
pub use user::{User, UserProfile, UserStats};
