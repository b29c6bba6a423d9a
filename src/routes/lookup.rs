// ABOUTME: Route handlers for the public lookup tables referenced by recipes
// ABOUTME: Areas, categories, ingredients, and landing-page testimonials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Lookup routes
//!
//! These endpoints serve the static reference data the client uses to
//! build recipe forms and filters. They require no authentication.
//! Category thumbnails are stored as paths relative to the public
//! directory and rewritten to absolute URLs here.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{errors::AppError, models::Category, resources::ServerResources};

/// Category with its thumbnail rewritten to an absolute URL
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Category identifier
    pub id: Uuid,
    /// Category name
    pub name: String,
    /// Absolute thumbnail URL, when the category has one
    pub thumb: Option<String>,
}

impl CategoryResponse {
    fn from_category(category: Category, base_url: &str) -> Self {
        Self {
            id: category.id,
            name: category.name,
            thumb: category
                .thumb
                .map(|thumb| format!("{}/public/{thumb}", base_url.trim_end_matches('/'))),
        }
    }
}

/// Lookup routes handler
pub struct LookupRoutes;

impl LookupRoutes {
    /// Create all lookup routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/areas", get(Self::handle_list_areas))
            .route("/api/categories", get(Self::handle_list_categories))
            .route("/api/ingredients", get(Self::handle_list_ingredients))
            .route("/api/testimonials", get(Self::handle_list_testimonials))
            .with_state(resources)
    }

    /// Handle GET /api/areas - List all areas
    async fn handle_list_areas(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let areas = resources.database.list_areas().await?;
        Ok((StatusCode::OK, Json(areas)).into_response())
    }

    /// Handle GET /api/categories - List all categories
    async fn handle_list_categories(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let categories = resources.database.list_categories().await?;

        let base_url = &resources.config.app_base_url;
        let response: Vec<CategoryResponse> = categories
            .into_iter()
            .map(|c| CategoryResponse::from_category(c, base_url))
            .collect();

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/ingredients - List all ingredients
    async fn handle_list_ingredients(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let ingredients = resources.database.list_ingredients().await?;
        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /api/testimonials - List all testimonials
    async fn handle_list_testimonials(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let testimonials = resources.database.list_testimonials().await?;
        Ok((StatusCode::OK, Json(testimonials)).into_response())
    }
}
