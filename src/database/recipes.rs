// ABOUTME: Recipe database operations: creation, detail joins, filtered listings
// ABOUTME: Recipe rows and their ingredient pairings are written in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AreaSummary, CategorySummary, IngredientDetail, OwnerSummary, Recipe, RecipeDetail,
    RecipeIngredient, RecipeListItem,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Equality filters applied to recipe listings
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeFilter {
    /// Only recipes in this category
    pub category_id: Option<Uuid>,
    /// Only recipes from this area
    pub area_id: Option<Uuid>,
    /// Only recipes containing this ingredient
    pub ingredient_id: Option<Uuid>,
    /// Only recipes owned by this user
    pub owner_id: Option<Uuid>,
}

impl RecipeFilter {
    fn where_clause(&self) -> String {
        let mut sql = String::from(" WHERE 1=1");
        if self.category_id.is_some() {
            sql.push_str(" AND r.category_id = ?");
        }
        if self.area_id.is_some() {
            sql.push_str(" AND r.area_id = ?");
        }
        if self.ingredient_id.is_some() {
            sql.push_str(
                " AND EXISTS (SELECT 1 FROM recipe_ingredients ri \
                 WHERE ri.recipe_id = r.id AND ri.ingredient_id = ?)",
            );
        }
        if self.owner_id.is_some() {
            sql.push_str(" AND r.owner_id = ?");
        }
        sql
    }

    fn bind_all<'q>(
        &self,
        mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        if let Some(id) = self.category_id {
            query = query.bind(id.to_string());
        }
        if let Some(id) = self.area_id {
            query = query.bind(id.to_string());
        }
        if let Some(id) = self.ingredient_id {
            query = query.bind(id.to_string());
        }
        if let Some(id) = self.owner_id {
            query = query.bind(id.to_string());
        }
        query
    }
}

/// Columns shared by every recipe listing/detail query
const RECIPE_VIEW_COLUMNS: &str = r"
    r.id, r.title, r.description, r.instructions, r.thumb, r.time,
    r.created_at, r.updated_at,
    a.id AS area_id, a.name AS area_name,
    u.id AS owner_id, u.name AS owner_name, u.email AS owner_email,
    c.id AS category_id, c.name AS category_name, c.thumb AS category_thumb";

const RECIPE_VIEW_JOINS: &str = r"
    FROM recipes r
    JOIN users u ON u.id = r.owner_id
    JOIN categories c ON c.id = r.category_id
    LEFT JOIN areas a ON a.id = r.area_id";

impl Database {
    /// Create the recipes and recipe_ingredients tables
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                instructions TEXT,
                thumb TEXT,
                time TEXT,
                category_id TEXT NOT NULL REFERENCES categories(id),
                area_id TEXT REFERENCES areas(id),
                owner_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                measure TEXT,
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_owner ON recipes(owner_id)")
            .execute(self.pool())
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_category ON recipes(category_id)")
            .execute(self.pool())
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_area ON recipes(area_id)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a recipe together with its ingredient pairings in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written on failure
    pub async fn create_recipe(
        &self,
        recipe: &Recipe,
        ingredients: &[RecipeIngredient],
    ) -> AppResult<Uuid> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, instructions, thumb, time,
                category_id, area_id, owner_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(recipe.id.to_string())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.instructions)
        .bind(&recipe.thumb)
        .bind(&recipe.time)
        .bind(recipe.category_id.to_string())
        .bind(recipe.area_id.map(|id| id.to_string()))
        .bind(recipe.owner_id.to_string())
        .bind(recipe.created_at.to_rfc3339())
        .bind(recipe.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        for pairing in ingredients {
            sqlx::query(
                r"
                INSERT OR REPLACE INTO recipe_ingredients (recipe_id, ingredient_id, measure)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(recipe.id.to_string())
            .bind(pairing.ingredient_id.to_string())
            .bind(&pairing.measure)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to pair ingredient: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        Ok(recipe.id)
    }

    /// Get the raw recipe row (ownership checks, favorites)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recipe(&self, id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, instructions, thumb, time,
                   category_id, area_id, owner_id, created_at, updated_at
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| Self::row_to_recipe(&r)).transpose()
    }

    /// Get the full recipe detail with area, owner, category, and ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recipe_detail(&self, id: Uuid) -> AppResult<Option<RecipeDetail>> {
        let sql = format!("SELECT {RECIPE_VIEW_COLUMNS} {RECIPE_VIEW_JOINS} WHERE r.id = $1");

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe detail: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ingredients = self.recipe_ingredient_details(id).await?;
        Ok(Some(Self::row_to_detail(&row, ingredients)?))
    }

    /// List recipes matching a filter, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_recipes(
        &self,
        filter: RecipeFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<RecipeListItem>> {
        let sql = format!(
            "SELECT {RECIPE_VIEW_COLUMNS} {RECIPE_VIEW_JOINS}{}
             ORDER BY r.created_at DESC
             LIMIT ? OFFSET ?",
            filter.where_clause()
        );

        let query = filter.bind_all(sqlx::query(&sql)).bind(limit).bind(offset);
        let rows = query
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(Self::row_to_list_item).collect()
    }

    /// Count recipes matching a filter
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_recipes(&self, filter: RecipeFilter) -> AppResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM recipes r{}",
            filter.where_clause()
        );

        let row = filter
            .bind_all(sqlx::query(&sql))
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        Ok(row.get("count"))
    }

    /// List recipes a user has favorited, most recently favorited first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_favorite_recipes(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<RecipeListItem>> {
        let sql = format!(
            "SELECT {RECIPE_VIEW_COLUMNS} {RECIPE_VIEW_JOINS}
             JOIN favorites f ON f.recipe_id = r.id
             WHERE f.user_id = $1
             ORDER BY f.created_at DESC
             LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        rows.iter().map(Self::row_to_list_item).collect()
    }

    /// List recipes ordered by favorite count, ties broken by recency
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_popular_recipes(
        &self,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<RecipeListItem>> {
        let sql = format!(
            "SELECT {RECIPE_VIEW_COLUMNS} {RECIPE_VIEW_JOINS}
             LEFT JOIN favorites f ON f.recipe_id = r.id
             GROUP BY r.id
             ORDER BY COUNT(f.user_id) DESC, r.created_at DESC
             LIMIT $1 OFFSET $2"
        );

        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to list popular recipes: {e}")))?;

        rows.iter().map(Self::row_to_list_item).collect()
    }

    /// Delete a recipe; pairings and favorites cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_recipe(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn recipe_ingredient_details(&self, recipe_id: Uuid) -> AppResult<Vec<IngredientDetail>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.thumb, ri.measure
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY i.name
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe ingredients: {e}")))?;

        rows.iter()
            .map(|row| {
                let id_str: String = row.get("id");
                Ok(IngredientDetail {
                    id: Self::parse_uuid(&id_str)?,
                    name: row.get("name"),
                    thumb: row.get("thumb"),
                    measure: row.get("measure"),
                })
            })
            .collect()
    }

    fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
        let id_str: String = row.get("id");
        let category_id_str: String = row.get("category_id");
        let area_id_str: Option<String> = row.get("area_id");
        let owner_id_str: String = row.get("owner_id");
        let created_at_str: String = row.get("created_at");
        let updated_at_str: String = row.get("updated_at");

        Ok(Recipe {
            id: Self::parse_uuid(&id_str)?,
            title: row.get("title"),
            description: row.get("description"),
            instructions: row.get("instructions"),
            thumb: row.get("thumb"),
            time: row.get("time"),
            category_id: Self::parse_uuid(&category_id_str)?,
            area_id: area_id_str.as_deref().map(Self::parse_uuid).transpose()?,
            owner_id: Self::parse_uuid(&owner_id_str)?,
            created_at: Self::parse_datetime(&created_at_str)?,
            updated_at: Self::parse_datetime(&updated_at_str)?,
        })
    }

    fn row_to_summaries(
        row: &SqliteRow,
    ) -> AppResult<(Option<AreaSummary>, OwnerSummary, CategorySummary)> {
        let area_id_str: Option<String> = row.get("area_id");
        let area = area_id_str
            .as_deref()
            .map(|id| {
                Ok::<_, AppError>(AreaSummary {
                    id: Self::parse_uuid(id)?,
                    name: row.get("area_name"),
                })
            })
            .transpose()?;

        let owner_id_str: String = row.get("owner_id");
        let owner = OwnerSummary {
            id: Self::parse_uuid(&owner_id_str)?,
            name: row.get("owner_name"),
            email: row.get("owner_email"),
        };

        let category_id_str: String = row.get("category_id");
        let category = CategorySummary {
            id: Self::parse_uuid(&category_id_str)?,
            name: row.get("category_name"),
            thumb: row.get("category_thumb"),
        };

        Ok((area, owner, category))
    }

    fn row_to_list_item(row: &SqliteRow) -> AppResult<RecipeListItem> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");
        let (area, owner, category) = Self::row_to_summaries(row)?;

        Ok(RecipeListItem {
            id: Self::parse_uuid(&id_str)?,
            title: row.get("title"),
            description: row.get("description"),
            thumb: row.get("thumb"),
            time: row.get("time"),
            created_at: Self::parse_datetime(&created_at_str)?,
            area,
            owner,
            category,
        })
    }

    fn row_to_detail(
        row: &SqliteRow,
        ingredients: Vec<IngredientDetail>,
    ) -> AppResult<RecipeDetail> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");
        let updated_at_str: String = row.get("updated_at");
        let (area, owner, category) = Self::row_to_summaries(row)?;

        Ok(RecipeDetail {
            id: Self::parse_uuid(&id_str)?,
            title: row.get("title"),
            description: row.get("description"),
            instructions: row.get("instructions"),
            thumb: row.get("thumb"),
            time: row.get("time"),
            created_at: Self::parse_datetime(&created_at_str)?,
            updated_at: Self::parse_datetime(&updated_at_str)?,
            area,
            owner,
            category,
            ingredients,
        })
    }
}
