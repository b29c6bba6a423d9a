// ABOUTME: User management database operations
// ABOUTME: Handles registration, session tokens, avatars, and profile counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserProfile, UserStats};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the users table and its indexes
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                avatar_url TEXT,
                token TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already in use or the insert fails
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists("Email in use"));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, name, email, password_hash, avatar_url, token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(&user.token)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Internal implementation for getting a user by a unique column
    async fn get_user_impl(&self, field: &str, value: &str) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT id, name, email, password_hash, avatar_url, token, created_at, updated_at
             FROM users WHERE {field} = $1"
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Replace the stored session token; `None` logs the user out
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_session_token(
        &self,
        user_id: Uuid,
        token: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE users SET token = $1, updated_at = $2 WHERE id = $3")
            .bind(token)
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to update session token: {e}")))?;

        Ok(())
    }

    /// Update a user's avatar location
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_avatar_url(&self, user_id: Uuid, avatar_url: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET avatar_url = $1, updated_at = $2 WHERE id = $3")
            .bind(avatar_url)
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to update avatar: {e}")))?;

        Ok(())
    }

    /// List public user profiles, newest accounts first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_users(&self, limit: i64, offset: i64) -> AppResult<Vec<UserProfile>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, avatar_url
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        rows.iter().map(Self::row_to_profile).collect()
    }

    /// Total number of registered users
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_users(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to count users: {e}")))?;

        Ok(row.get("count"))
    }

    /// Aggregate activity counters for a user's profile page
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn user_stats(&self, user_id: Uuid) -> AppResult<UserStats> {
        let row = sqlx::query(
            r"
            SELECT
                (SELECT COUNT(*) FROM recipes WHERE owner_id = $1) AS created_recipes,
                (SELECT COUNT(*) FROM favorites WHERE user_id = $1) AS favorites,
                (SELECT COUNT(*) FROM follows WHERE following_id = $1) AS followers,
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following
            ",
        )
        .bind(user_id.to_string())
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to compute user stats: {e}")))?;

        Ok(UserStats {
            created_recipes: row.get("created_recipes"),
            favorites: row.get("favorites"),
            followers: row.get("followers"),
            following: row.get("following"),
        })
    }

    pub(super) fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
        let id_str: String = row.get("id");
        Ok(UserProfile {
            id: Self::parse_uuid(&id_str)?,
            name: row.get("name"),
            email: row.get("email"),
            avatar_url: row.get("avatar_url"),
        })
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");
        let updated_at_str: String = row.get("updated_at");

        Ok(User {
            id: Self::parse_uuid(&id_str)?,
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            avatar_url: row.get("avatar_url"),
            token: row.get("token"),
            created_at: Self::parse_datetime(&created_at_str)?,
            updated_at: Self::parse_datetime(&updated_at_str)?,
        })
    }

    pub(super) fn parse_uuid(value: &str) -> AppResult<Uuid> {
        Uuid::parse_str(value).map_err(|e| AppError::database(format!("Invalid UUID: {e}")))
    }

    pub(super) fn parse_datetime(value: &str) -> AppResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AppError::database(format!("Invalid date: {e}")))
    }
}
