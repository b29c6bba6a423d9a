// ABOUTME: Static lookup table rows referenced by recipes
// ABOUTME: Areas, categories, ingredients, and landing-page testimonials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cuisine area (e.g. "Indian")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    /// Area identifier
    pub id: Uuid,
    /// Area name
    pub name: String,
}

/// A recipe category (e.g. "Dessert")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: Uuid,
    /// Category name
    pub name: String,
    /// Thumbnail path relative to the public directory
    pub thumb: Option<String>,
}

/// An ingredient recipes can reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient identifier
    pub id: Uuid,
    /// Ingredient name
    pub name: String,
    /// Thumbnail URL
    pub thumb: Option<String>,
    /// Short description
    pub description: Option<String>,
}

/// A landing-page testimonial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    /// Testimonial identifier
    pub id: Uuid,
    /// Testimonial text
    pub testimonial: String,
}

impl Area {
    /// Create a new area with a generated id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Category {
    /// Create a new category with a generated id
    #[must_use]
    pub fn new(name: impl Into<String>, thumb: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            thumb,
        }
    }
}

impl Ingredient {
    /// Create a new ingredient with a generated id
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        thumb: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            thumb,
            description,
        }
    }
}

impl Testimonial {
    /// Create a new testimonial with a generated id
    #[must_use]
    pub fn new(testimonial: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            testimonial: testimonial.into(),
        }
    }
}
