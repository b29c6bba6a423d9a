// ABOUTME: User account models for the JWT-authenticated recipe-sharing service
// ABOUTME: User row, public profile projection, and social/activity counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a registered user
///
/// The `token` field holds the JWT issued at the most recent
/// register/login; requests presenting any other token are rejected,
/// which is how logout invalidates sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique, used for login)
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Avatar location: a Gravatar URL or a `/public/avatars/...` path
    pub avatar_url: Option<String>,
    /// Currently valid session token, None when logged out
    pub token: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given profile data and password hash
    #[must_use]
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            avatar_url,
            token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public view of a user, safe to return to other users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Avatar location
    pub avatar_url: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
        }
    }
}

/// Aggregated activity counters shown on profile pages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct UserStats {
    /// Recipes owned by the user
    pub created_recipes: i64,
    /// Recipes the user has favorited
    pub favorites: i64,
    /// Users following this user
    pub followers: i64,
    /// Users this user follows
    pub following: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_session() {
        let user = User::new(
            "Amelia".into(),
            "amelia@example.com".into(),
            "$2b$12$hash".into(),
            None,
        );
        assert!(user.token.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_profile_drops_credentials() {
        let user = User::new(
            "Amelia".into(),
            "amelia@example.com".into(),
            "$2b$12$hash".into(),
            Some("/public/avatars/a.png".into()),
        );
        let profile = UserProfile::from(user.clone());
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email, "amelia@example.com");
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("token"));
    }
}
