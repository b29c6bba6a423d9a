// ABOUTME: Route handlers for user profiles and the social follow graph
// ABOUTME: Profile counters, follow/unfollow, follower listings, avatar upload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! User routes
//!
//! This module handles user profile endpoints and the directed follow
//! relationship between users. All endpoints require JWT authentication
//! to identify the caller.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{User, UserProfile},
    pagination::{PageQuery, Pagination},
    resources::ServerResources,
    uploads,
};

// ============================================================================
// Response Types
// ============================================================================

/// Paginated list of public user profiles
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// Total matching users
    pub total: i64,
    /// Current page (1-based)
    pub page: i64,
    /// Number of pages at this limit
    pub total_pages: i64,
    /// Page size
    pub limit: i64,
    /// Profiles on this page
    pub users: Vec<UserProfile>,
}

/// Profile plus activity counters for the session's own user
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// Public profile
    pub user: UserProfile,
    /// Recipes owned by the user
    pub created_recipes: i64,
    /// Recipes the user favorited
    pub favorites: i64,
    /// Users following this user
    pub followers: i64,
    /// Users this user follows
    pub following: i64,
}

/// Profile plus activity counters for another user
///
/// Unlike [`CurrentUserResponse`] this does not expose who the user
/// follows, only how many follow them.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// Public profile
    pub user: UserProfile,
    /// Recipes owned by the user
    pub created_recipes: i64,
    /// Recipes the user favorited
    pub favorites: i64,
    /// Users following this user
    pub followers: i64,
}

/// Simple confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Response after a successful avatar upload
#[derive(Debug, Serialize, Deserialize)]
pub struct AvatarResponse {
    /// New avatar location under `/public`
    pub avatar_url: String,
}

// ============================================================================
// Routes
// ============================================================================

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", get(Self::handle_list_users))
            .route("/api/users/current", get(Self::handle_current_user))
            .route("/api/users/avatars", patch(Self::handle_change_avatar))
            .route("/api/users/:id", get(Self::handle_get_user))
            .route("/api/users/:id/follow", post(Self::handle_follow))
            .route("/api/users/:id/follow", delete(Self::handle_unfollow))
            .route("/api/users/:id/followers", get(Self::handle_list_followers))
            .route("/api/users/:id/following", get(Self::handle_list_following))
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

    fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid user ID format"))
    }

    /// Handle GET /api/users - List public profiles
    async fn handle_list_users(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;

        let pagination = Pagination::from_query(query);
        let total = resources.database.count_users().await?;
        let users = resources
            .database
            .list_users(pagination.limit, pagination.offset())
            .await?;

        let response = ListUsersResponse {
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
            limit: pagination.limit,
            users,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/current - Own profile with all counters
    async fn handle_current_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;
        let stats = resources.database.user_stats(user.id).await?;

        let response = CurrentUserResponse {
            user: user.into(),
            created_recipes: stats.created_recipes,
            favorites: stats.favorites,
            followers: stats.followers,
            following: stats.following,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:id - Another user's profile
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;
        let user_id = Self::parse_user_id(&id)?;

        let user = resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let stats = resources.database.user_stats(user_id).await?;

        let response = UserInfoResponse {
            user: user.into(),
            created_recipes: stats.created_recipes,
            favorites: stats.favorites,
            followers: stats.followers,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PATCH /api/users/avatars - Upload a new avatar image
    async fn handle_change_avatar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;

        let mut stored: Option<String> = None;
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some("avatar") {
                continue;
            }

            let file_name = field
                .file_name()
                .map(ToOwned::to_owned)
                .ok_or_else(|| AppError::invalid_input("Avatar field has no file name"))?;
            let data = field.bytes().await?;

            let avatars_dir = resources.config.uploads.avatars_dir();
            stored = Some(uploads::save_image(&avatars_dir, user.id, &file_name, &data).await?);
        }

        let Some(file_name) = stored else {
            return Err(AppError::new(
                crate::errors::ErrorCode::MissingRequiredField,
                "Multipart field 'avatar' is required",
            ));
        };

        let avatar_url = format!("/public/avatars/{file_name}");
        resources
            .database
            .update_avatar_url(user.id, &avatar_url)
            .await?;

        tracing::info!(user_id = %user.id, "Avatar updated");
        Ok((StatusCode::OK, Json(AvatarResponse { avatar_url })).into_response())
    }

    /// Handle POST /api/users/:id/follow - Follow a user
    async fn handle_follow(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let follower = Self::authenticate(&headers, &resources).await?;
        let following_id = Self::parse_user_id(&id)?;

        if follower.id == following_id {
            return Err(AppError::invalid_input("You can't follow yourself"));
        }

        resources
            .database
            .get_user(following_id)
            .await?
            .ok_or_else(|| AppError::not_found("User to follow"))?;

        if resources
            .database
            .is_following(follower.id, following_id)
            .await?
        {
            return Err(AppError::already_exists("Already following this user"));
        }

        resources
            .database
            .create_follow(follower.id, following_id)
            .await?;

        let response = MessageResponse {
            message: format!("Now following user {following_id}"),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/users/:id/follow - Unfollow a user
    async fn handle_unfollow(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let follower = Self::authenticate(&headers, &resources).await?;
        let following_id = Self::parse_user_id(&id)?;

        if follower.id == following_id {
            return Err(AppError::invalid_input("You can't unfollow yourself"));
        }

        resources
            .database
            .get_user(following_id)
            .await?
            .ok_or_else(|| AppError::not_found("User to unfollow"))?;

        let removed = resources
            .database
            .delete_follow(follower.id, following_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Follow relationship"));
        }

        let response = MessageResponse {
            message: format!("Unfollowed user {following_id}"),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:id/followers - Who follows this user
    async fn handle_list_followers(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;
        let user_id = Self::parse_user_id(&id)?;

        resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let pagination = Pagination::from_query(query);
        let total = resources.database.count_followers(user_id).await?;
        let users = resources
            .database
            .list_followers(user_id, pagination.limit, pagination.offset())
            .await?;

        let response = ListUsersResponse {
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
            limit: pagination.limit,
            users,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/:id/following - Who this user follows
    async fn handle_list_following(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        Self::authenticate(&headers, &resources).await?;
        let user_id = Self::parse_user_id(&id)?;

        resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let pagination = Pagination::from_query(query);
        let total = resources.database.count_following(user_id).await?;
        let users = resources
            .database
            .list_following(user_id, pagination.limit, pagination.offset())
            .await?;

        let response = ListUsersResponse {
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
            limit: pagination.limit,
            users,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
