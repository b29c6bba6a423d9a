// ABOUTME: Social graph database operations: follows between users, recipe favorites
// ABOUTME: Both are plain join tables with composite primary keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the follows and favorites tables
    pub(super) async fn migrate_social(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS follows (
                follower_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                following_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (follower_id, following_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_follows_following ON follows(following_id)")
            .execute(self.pool())
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorites_recipe ON favorites(recipe_id)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    // ========================================================================
    // Follows
    // ========================================================================

    /// Record that `follower_id` follows `following_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO follows (follower_id, following_id, created_at) VALUES ($1, $2, $3)",
        )
        .bind(follower_id.to_string())
        .bind(following_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create follow: {e}")))?;

        Ok(())
    }

    /// Remove a follow edge; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_follow(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id.to_string())
                .bind(following_id.to_string())
                .execute(self.pool())
                .await
                .map_err(|e| AppError::database(format!("Failed to delete follow: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether `follower_id` currently follows `following_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM follows WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(follower_id.to_string())
        .bind(following_id.to_string())
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to query follow: {e}")))?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    /// Profiles of users following `user_id`, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_followers(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.name, u.email, u.avatar_url
            FROM follows f
            JOIN users u ON u.id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list followers: {e}")))?;

        rows.iter().map(Self::row_to_profile).collect()
    }

    /// Profiles of users that `user_id` follows, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_following(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.name, u.email, u.avatar_url
            FROM follows f
            JOIN users u ON u.id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list following: {e}")))?;

        rows.iter().map(Self::row_to_profile).collect()
    }

    /// Number of users following `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_followers(&self, user_id: Uuid) -> AppResult<i64> {
        self.count_edges("follows", "following_id", user_id).await
    }

    /// Number of users `user_id` follows
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_following(&self, user_id: Uuid) -> AppResult<i64> {
        self.count_edges("follows", "follower_id", user_id).await
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Record that `user_id` favorited `recipe_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        sqlx::query("INSERT INTO favorites (user_id, recipe_id, created_at) VALUES ($1, $2, $3)")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .bind(Utc::now().to_rfc3339())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create favorite: {e}")))?;

        Ok(())
    }

    /// Remove a favorite; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to delete favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether `user_id` has favorited `recipe_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn is_favorited(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM favorites WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to query favorite: {e}")))?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    /// Number of recipes `user_id` has favorited
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_favorites_of_user(&self, user_id: Uuid) -> AppResult<i64> {
        self.count_edges("favorites", "user_id", user_id).await
    }

    async fn count_edges(&self, table: &str, column: &str, id: Uuid) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) AS count FROM {table} WHERE {column} = $1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to count {table}: {e}")))?;

        Ok(row.get("count"))
    }
}
