// ABOUTME: Database management over a shared SQLite pool
// ABOUTME: Owns idempotent schema migration, split into per-domain operation files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! # Database Management
//!
//! This module provides database functionality for the Foodies API.
//! The [`Database`] struct wraps a `SqlitePool`; operations are
//! implemented in per-domain files (`users`, `recipes`, `social`,
//! `lookup`) and the schema is created idempotently at startup.

mod lookup;
mod recipes;
mod social;
mod users;

pub use recipes::RecipeFilter;

use crate::errors::{AppError, AppResult};
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user, recipe, and lookup storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Wrap an existing pool (used by tests and the seeder)
    ///
    /// # Errors
    ///
    /// Returns an error if schema migration fails
    pub async fn from_pool(pool: SqlitePool) -> AppResult<Self> {
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_lookup().await?;
        self.migrate_recipes().await?;
        self.migrate_social().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
    }
}
