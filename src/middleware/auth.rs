// ABOUTME: Request authentication middleware for Bearer session tokens
// ABOUTME: Validates the JWT, loads the user, and enforces stored-token equality
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use crate::auth::AuthManager;
use crate::constants::error_messages;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use std::sync::Arc;

/// Middleware for Bearer token authentication
///
/// A token is only accepted while it matches the one stored on the user
/// row. Logout clears the stored token, which invalidates every copy of
/// the JWT immediately regardless of its `exp`.
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The header is missing or not a `Bearer` scheme
    /// - JWT validation fails
    /// - The user no longer exists
    /// - The token does not match the user's stored session token
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<User> {
        let Some(header) = auth_header else {
            tracing::debug!("Authentication failed: missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = header.strip_prefix("Bearer ") else {
            tracing::debug!("Authentication failed: invalid authorization header format");
            return Err(AppError::auth_invalid(
                "Invalid authorization header format - must be 'Bearer <token>'",
            ));
        };
        let token = token.trim();

        let claims = self.auth_manager.validate_token(token)?;
        let user_id = AuthManager::user_id_from_claims(&claims)?;

        let user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid(error_messages::NOT_AUTHORIZED))?;

        // Stored-token check: logout or a newer login invalidates this JWT
        if user.token.as_deref() != Some(token) {
            tracing::debug!(user_id = %user_id, "Authentication failed: stale session token");
            return Err(AppError::auth_invalid(error_messages::NOT_AUTHORIZED));
        }

        Ok(user)
    }
}
