// ABOUTME: Route handlers for recipe CRUD, filtered search, and favorites
// ABOUTME: Creation is multipart (fields + optional thumbnail); reads are paginated joins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Recipe routes
//!
//! This module handles recipe listing with equality filters, the full
//! detail view, multipart creation, owner-only deletion, and the
//! favorite relationship. All endpoints require JWT authentication.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    database::RecipeFilter,
    errors::AppError,
    models::{NewRecipe, Recipe, RecipeIngredient, RecipeListItem, User},
    pagination::{PageQuery, Pagination},
    resources::ServerResources,
    uploads,
};

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for recipe listings: pagination plus equality filters
#[derive(Debug, Deserialize, Default)]
pub struct RecipeListQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Items per page
    pub limit: Option<i64>,
    /// Only recipes in this category
    pub category_id: Option<Uuid>,
    /// Only recipes from this area
    pub area_id: Option<Uuid>,
    /// Only recipes containing this ingredient
    pub ingredient_id: Option<Uuid>,
}

/// One ingredient reference in the multipart `ingredients` JSON field
#[derive(Debug, Deserialize)]
pub struct IngredientPayload {
    /// Ingredient id
    pub id: Uuid,
    /// Measure text, e.g. "2 tbsp"
    pub measure: Option<String>,
}

/// Paginated recipe listing
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Total matching recipes
    pub total: i64,
    /// Current page (1-based)
    pub page: i64,
    /// Number of pages at this limit
    pub total_pages: i64,
    /// Page size
    pub limit: i64,
    /// Recipes on this page
    pub recipes: Vec<RecipeListItem>,
}

/// Response after creating a recipe
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecipeResponse {
    /// Confirmation message
    pub message: String,
    /// Id of the new recipe
    pub recipe_id: Uuid,
}

/// Simple confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Collected multipart fields for recipe creation
#[derive(Debug, Default)]
struct CreateRecipeForm {
    title: Option<String>,
    description: Option<String>,
    instructions: Option<String>,
    time: Option<String>,
    category_id: Option<String>,
    area_id: Option<String>,
    ingredients: Option<String>,
    thumb: Option<String>,
}

// ============================================================================
// Routes
// ============================================================================

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route("/api/recipes/own", get(Self::handle_list_own))
            .route("/api/recipes/favorites", get(Self::handle_list_favorites))
            .route("/api/recipes/popular", get(Self::handle_list_popular))
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id", delete(Self::handle_delete))
            .route("/api/recipes/:id/favorite", post(Self::handle_favorite))
            .route("/api/recipes/:id/favorite", delete(Self::handle_unfavorite))
            .with_state(resources)
    }

    /// Extract and authenticate the user from the authorization header
    async fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<User, AppError> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources
            .auth_middleware
            .authenticate_request(auth_header)
            .await
    }

    fn parse_recipe_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid recipe ID format"))
    }

    fn list_response(
        pagination: Pagination,
        total: i64,
        recipes: Vec<RecipeListItem>,
    ) -> ListRecipesResponse {
        ListRecipesResponse {
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
            limit: pagination.limit,
            recipes,
        }
    }

    /// Handle GET /api/recipes - Filtered, paginated listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;

        let pagination = Pagination::from_query(PageQuery {
            page: query.page,
            limit: query.limit,
        });
        let filter = RecipeFilter {
            category_id: query.category_id,
            area_id: query.area_id,
            ingredient_id: query.ingredient_id,
            owner_id: None,
        };

        let total = resources.database.count_recipes(filter).await?;
        let recipes = resources
            .database
            .list_recipes(filter, pagination.limit, pagination.offset())
            .await?;

        Ok((
            StatusCode::OK,
            Json(Self::list_response(pagination, total, recipes)),
        )
            .into_response())
    }

    /// Handle GET /api/recipes/own - The caller's recipes
    async fn handle_list_own(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;

        let pagination = Pagination::from_query(query);
        let filter = RecipeFilter {
            owner_id: Some(user.id),
            ..RecipeFilter::default()
        };

        let total = resources.database.count_recipes(filter).await?;
        let recipes = resources
            .database
            .list_recipes(filter, pagination.limit, pagination.offset())
            .await?;

        Ok((
            StatusCode::OK,
            Json(Self::list_response(pagination, total, recipes)),
        )
            .into_response())
    }

    /// Handle GET /api/recipes/favorites - Recipes the caller favorited
    async fn handle_list_favorites(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;

        let pagination = Pagination::from_query(query);
        let total = resources.database.count_favorites_of_user(user.id).await?;
        let recipes = resources
            .database
            .list_favorite_recipes(user.id, pagination.limit, pagination.offset())
            .await?;

        Ok((
            StatusCode::OK,
            Json(Self::list_response(pagination, total, recipes)),
        )
            .into_response())
    }

    /// Handle GET /api/recipes/popular - Most favorited recipes
    async fn handle_list_popular(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;

        let pagination = Pagination::from_query(query);
        let total = resources.database.count_recipes(RecipeFilter::default()).await?;
        let recipes = resources
            .database
            .list_popular_recipes(pagination.limit, pagination.offset())
            .await?;

        Ok((
            StatusCode::OK,
            Json(Self::list_response(pagination, total, recipes)),
        )
            .into_response())
    }

    /// Handle GET /api/recipes/:id - Full recipe detail
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;
        let recipe_id = Self::parse_recipe_id(&id)?;

        let detail = resources
            .database
            .get_recipe_detail(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle POST /api/recipes - Create a recipe from a multipart form
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        multipart: Multipart,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;

        let form = Self::collect_form(&resources, &user, multipart).await?;

        let title = form
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::invalid_input("Title, category and at least one ingredient are required")
            })?
            .to_owned();

        let category_id = form
            .category_id
            .as_deref()
            .ok_or_else(|| {
                AppError::invalid_input("Title, category and at least one ingredient are required")
            })
            .and_then(|raw| {
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::invalid_input("Invalid category ID format"))
            })?;

        let area_id = form
            .area_id
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Uuid::parse_str(raw).map_err(|_| AppError::invalid_input("Invalid area ID format"))
            })
            .transpose()?;

        let payload: Vec<IngredientPayload> =
            serde_json::from_str(form.ingredients.as_deref().unwrap_or("[]"))
                .map_err(|e| AppError::invalid_input(format!("Invalid ingredients JSON: {e}")))?;
        if payload.is_empty() {
            return Err(AppError::invalid_input(
                "Title, category and at least one ingredient are required",
            ));
        }

        // Referenced lookup rows must exist before the transaction starts
        if !resources.database.category_exists(category_id).await? {
            return Err(AppError::invalid_input("Unknown category"));
        }
        if let Some(area_id) = area_id {
            if !resources.database.area_exists(area_id).await? {
                return Err(AppError::invalid_input("Unknown area"));
            }
        }
        for item in &payload {
            if !resources.database.ingredient_exists(item.id).await? {
                return Err(AppError::invalid_input(format!(
                    "Unknown ingredient: {}",
                    item.id
                )));
            }
        }

        let recipe = Recipe::new(
            user.id,
            NewRecipe {
                title,
                description: form.description,
                instructions: form.instructions,
                thumb: form.thumb,
                time: form.time,
                category_id,
                area_id,
            },
        );
        let pairings: Vec<RecipeIngredient> = payload
            .into_iter()
            .map(|item| RecipeIngredient {
                ingredient_id: item.id,
                measure: item.measure,
            })
            .collect();

        let recipe_id = resources.database.create_recipe(&recipe, &pairings).await?;

        tracing::info!(recipe_id = %recipe_id, owner = %user.id, "Recipe created");
        let response = CreateRecipeResponse {
            message: "Recipe created successfully".into(),
            recipe_id,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - Owner-only deletion
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;
        let recipe_id = Self::parse_recipe_id(&id)?;

        let recipe = resources
            .database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        if recipe.owner_id != user.id {
            return Err(AppError::permission_denied(
                "Only the owner can delete this recipe",
            ));
        }

        resources.database.delete_recipe(recipe_id).await?;

        tracing::info!(recipe_id = %recipe_id, owner = %user.id, "Recipe deleted");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/recipes/:id/favorite - Favorite a recipe
    async fn handle_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;
        let recipe_id = Self::parse_recipe_id(&id)?;

        resources
            .database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        if resources.database.is_favorited(user.id, recipe_id).await? {
            return Err(AppError::already_exists("Recipe already in favorites"));
        }

        resources.database.create_favorite(user.id, recipe_id).await?;

        let response = MessageResponse {
            message: format!("Recipe {recipe_id} added to favorites"),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/favorite - Remove a favorite
    async fn handle_unfavorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;
        let recipe_id = Self::parse_recipe_id(&id)?;

        resources
            .database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        let removed = resources.database.delete_favorite(user.id, recipe_id).await?;
        if !removed {
            return Err(AppError::not_found("Favorite"));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Drain the multipart stream, storing the thumbnail as a side effect
    async fn collect_form(
        resources: &Arc<ServerResources>,
        user: &User,
        mut multipart: Multipart,
    ) -> Result<CreateRecipeForm, AppError> {
        let mut form = CreateRecipeForm::default();

        while let Some(field) = multipart.next_field().await? {
            match field.name() {
                Some("title") => form.title = Some(field.text().await?),
                Some("description") => form.description = Some(field.text().await?),
                Some("instructions") => form.instructions = Some(field.text().await?),
                Some("time") => form.time = Some(field.text().await?),
                Some("category_id") => form.category_id = Some(field.text().await?),
                Some("area_id") => form.area_id = Some(field.text().await?),
                Some("ingredients") => form.ingredients = Some(field.text().await?),
                Some("thumb") => {
                    let file_name = field
                        .file_name()
                        .map(ToOwned::to_owned)
                        .ok_or_else(|| {
                            AppError::invalid_input("Thumbnail field has no file name")
                        })?;
                    let data = field.bytes().await?;

                    let thumbs_dir = resources.config.uploads.recipe_thumbs_dir();
                    let stored =
                        uploads::save_image(&thumbs_dir, user.id, &file_name, &data).await?;
                    form.thumb = Some(format!("/public/recipes/{stored}"));
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
