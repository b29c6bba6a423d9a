// ABOUTME: JWT-based user authentication and session token management
// ABOUTME: Handles token generation and validation with HS256 signing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! # Authentication and Session Management
//!
//! This module provides HS256 JWT issue and validation for user
//! sessions. The issued token is also persisted on the user row, so a
//! token stops working the moment the user logs out or logs in again
//! elsewhere (see [`crate::middleware::auth`]).

use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authentication manager for `JWT` session tokens
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
    /// Monotonic counter to ensure unique issued-at values for tokens
    /// minted within the same second
    token_counter: AtomicU64,
}

impl Clone for AuthManager {
    fn clone(&self) -> Self {
        // A fresh counter is fine; each instance maintains uniqueness
        // independently
        Self {
            jwt_secret: self.jwt_secret.clone(),
            token_expiry_hours: self.token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }

    /// When a token issued right now would expire
    #[must_use]
    pub fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Generate an HS256 `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();

        // Use the atomic counter so two tokens for the same user minted
        // within one second still differ
        let counter = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let unique_iat = now.timestamp() * 1000 + i64::from(u32::try_from(counter % 1000).unwrap_or(0));

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: unique_iat,
            exp: self.expiry_from_now().timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Validate an HS256 `JWT` token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired, malformed, or carries
    /// an invalid signature
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired(),
            _ => AppError::auth_invalid(format!("Invalid session token: {e}")),
        })
    }

    /// Extract the user id from validated claims
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a valid UUID
    pub fn user_id_from_claims(claims: &Claims) -> AppResult<Uuid> {
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid user ID in token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "Test".into(),
            "test@example.com".into(),
            "$2b$12$hash".into(),
            None,
        )
    }

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret".to_vec(), 24)
    }

    #[test]
    fn test_round_trip() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(AuthManager::user_id_from_claims(&claims).unwrap(), user.id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = test_user();
        let token = test_manager().generate_token(&user).unwrap();

        let other = AuthManager::new(b"other-secret".to_vec(), 24);
        let err = other.validate_token(&token).unwrap_err();
        assert_eq!(err.http_status(), 401);
    }

    #[test]
    fn test_expired_token_rejected() {
        let user = test_user();
        // Negative expiry puts `exp` in the past
        let manager = AuthManager::new(b"test-secret".to_vec(), -2);

        let token = manager.generate_token(&user).unwrap();
        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthExpired);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = test_manager();
        assert!(manager.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_tokens_minted_back_to_back_differ() {
        let manager = test_manager();
        let user = test_user();

        let first = manager.generate_token(&user).unwrap();
        let second = manager.generate_token(&user).unwrap();
        assert_ne!(first, second);
    }
}
