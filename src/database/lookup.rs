// ABOUTME: Lookup table database operations for areas, categories, ingredients, testimonials
// ABOUTME: Read-mostly tables populated by the seeder and referenced by recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Area, Category, Ingredient, Testimonial};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the lookup tables
    pub(super) async fn migrate_lookup(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS areas (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                thumb TEXT
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                thumb TEXT,
                description TEXT
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS testimonials (
                id TEXT PRIMARY KEY,
                testimonial TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// List all areas, alphabetically
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_areas(&self) -> AppResult<Vec<Area>> {
        let rows = sqlx::query("SELECT id, name FROM areas ORDER BY name")
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list areas: {e}")))?;

        rows.iter()
            .map(|row| {
                let id_str: String = row.get("id");
                Ok(Area {
                    id: Self::parse_uuid(&id_str)?,
                    name: row.get("name"),
                })
            })
            .collect()
    }

    /// List all categories, alphabetically
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, thumb FROM categories ORDER BY name")
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list categories: {e}")))?;

        rows.iter()
            .map(|row| {
                let id_str: String = row.get("id");
                Ok(Category {
                    id: Self::parse_uuid(&id_str)?,
                    name: row.get("name"),
                    thumb: row.get("thumb"),
                })
            })
            .collect()
    }

    /// List all ingredients, alphabetically
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        let rows =
            sqlx::query("SELECT id, name, thumb, description FROM ingredients ORDER BY name")
                .fetch_all(self.pool())
                .await
                .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter()
            .map(|row| {
                let id_str: String = row.get("id");
                Ok(Ingredient {
                    id: Self::parse_uuid(&id_str)?,
                    name: row.get("name"),
                    thumb: row.get("thumb"),
                    description: row.get("description"),
                })
            })
            .collect()
    }

    /// List all testimonials
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let rows = sqlx::query("SELECT id, testimonial FROM testimonials")
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list testimonials: {e}")))?;

        rows.iter()
            .map(|row| {
                let id_str: String = row.get("id");
                Ok(Testimonial {
                    id: Self::parse_uuid(&id_str)?,
                    testimonial: row.get("testimonial"),
                })
            })
            .collect()
    }

    /// Insert an area, ignoring duplicates by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert_area(&self, area: &Area) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO areas (id, name) VALUES ($1, $2)")
            .bind(area.id.to_string())
            .bind(&area.name)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to insert area: {e}")))?;

        Ok(())
    }

    /// Insert a category, ignoring duplicates by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert_category(&self, category: &Category) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO categories (id, name, thumb) VALUES ($1, $2, $3)")
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(&category.thumb)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to insert category: {e}")))?;

        Ok(())
    }

    /// Insert an ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO ingredients (id, name, thumb, description) VALUES ($1, $2, $3, $4)",
        )
        .bind(ingredient.id.to_string())
        .bind(&ingredient.name)
        .bind(&ingredient.thumb)
        .bind(&ingredient.description)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to insert ingredient: {e}")))?;

        Ok(())
    }

    /// Insert a testimonial
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert_testimonial(&self, testimonial: &Testimonial) -> AppResult<()> {
        sqlx::query("INSERT INTO testimonials (id, testimonial) VALUES ($1, $2)")
            .bind(testimonial.id.to_string())
            .bind(&testimonial.testimonial)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to insert testimonial: {e}")))?;

        Ok(())
    }

    /// Whether a category with the given id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn category_exists(&self, id: Uuid) -> AppResult<bool> {
        self.lookup_exists("categories", id).await
    }

    /// Whether an area with the given id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn area_exists(&self, id: Uuid) -> AppResult<bool> {
        self.lookup_exists("areas", id).await
    }

    /// Whether an ingredient with the given id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn ingredient_exists(&self, id: Uuid) -> AppResult<bool> {
        self.lookup_exists("ingredients", id).await
    }

    async fn lookup_exists(&self, table: &str, id: Uuid) -> AppResult<bool> {
        let sql = format!("SELECT COUNT(*) AS count FROM {table} WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to query {table}: {e}")))?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }
}
