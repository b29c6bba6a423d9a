// ABOUTME: User authentication route handlers for registration, login, and sessions
// ABOUTME: Provides REST endpoints for account creation and JWT session management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Authentication routes for user management
//!
//! This module handles user registration, login, logout, and the
//! current-session endpoint. All handlers are thin wrappers that
//! delegate business logic to [`AuthService`].

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::{
    constants::{error_messages, limits},
    errors::{AppError, AppResult},
    models::{User, UserProfile},
    resources::ServerResources,
};

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address, unique per account
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Response for register and login: the session token plus the profile
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer session token
    pub token: String,
    /// Public profile of the authenticated user
    pub user: UserProfile,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Create the service over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the email is taken, or a
    /// database operation fails
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        tracing::info!("User registration attempt for email: {}", request.email);

        if request.name.trim().is_empty() {
            return Err(AppError::invalid_input(error_messages::NAME_REQUIRED));
        }
        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(error_messages::PASSWORD_TOO_WEAK));
        }

        if self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists(error_messages::EMAIL_IN_USE));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let avatar_url = Some(Self::gravatar_url(&request.email));
        let user = User::new(
            request.name.trim().to_owned(),
            request.email.clone(),
            password_hash,
            avatar_url,
        );

        let user_id = self.resources.database.create_user(&user).await?;
        let token = self.issue_session(&user).await?;

        tracing::info!(
            "User registered successfully: {} ({})",
            request.email,
            user_id
        );

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or a database
    /// operation fails
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        tracing::info!("User login attempt for email: {}", request.email);

        let user = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::auth_invalid(error_messages::INVALID_CREDENTIALS))?;

        // Verify password using spawn_blocking to avoid blocking the async executor
        let password = request.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        let token = self.issue_session(&user).await?;

        tracing::info!("User logged in successfully: {} ({})", request.email, user.id);

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Clear the stored session token, invalidating the presented JWT
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn logout(&self, user: &User) -> AppResult<()> {
        self.resources
            .database
            .update_session_token(user.id, None)
            .await?;
        tracing::info!("User logged out: {}", user.id);
        Ok(())
    }

    /// Issue a fresh JWT and persist it as the user's only valid session
    async fn issue_session(&self, user: &User) -> AppResult<String> {
        let token = self.resources.auth_manager.generate_token(user)?;
        self.resources
            .database
            .update_session_token(user.id, Some(&token))
            .await?;
        Ok(token)
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub fn is_valid_password(password: &str) -> bool {
        password.len() >= limits::MIN_PASSWORD_LENGTH
    }

    /// Default avatar: Gravatar "retro" image keyed by the email digest
    #[must_use]
    pub fn gravatar_url(email: &str) -> String {
        let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
        format!(
            "https://gravatar.com/avatar/{}?s=250&d=retro",
            hex::encode(digest)
        )
    }
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route("/api/auth/current", get(Self::handle_current))
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

    /// Handle POST /api/auth/register - Create an account and log in
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).register(body).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login - Authenticate and start a session
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).login(body).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/auth/logout - End the current session
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;
        AuthService::new(resources).logout(&user).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/auth/current - Profile of the session's user
    async fn handle_current(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = Self::authenticate(&headers, &resources).await?;
        let profile: UserProfile = user.into();
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AuthService::is_valid_email("user@example.com"));
        assert!(!AuthService::is_valid_email("userexample.com"));
        assert!(!AuthService::is_valid_email("@example.com"));
        assert!(!AuthService::is_valid_email("user@"));
        assert!(!AuthService::is_valid_email("user@nodot"));
        assert!(!AuthService::is_valid_email("a@b"));
    }

    #[test]
    fn test_password_validation() {
        assert!(AuthService::is_valid_password("secret"));
        assert!(!AuthService::is_valid_password("short"));
    }

    #[test]
    fn test_gravatar_url_is_stable_and_case_insensitive() {
        let a = AuthService::gravatar_url("User@Example.com");
        let b = AuthService::gravatar_url("user@example.com ");
        assert_eq!(a, b);
        assert!(a.starts_with("https://gravatar.com/avatar/"));
        assert!(a.ends_with("?s=250&d=retro"));
    }
}
