// ABOUTME: Integration tests for the recipes database module
// ABOUTME: Covers transactional creation, detail joins, filters, pagination, deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

#![allow(missing_docs, clippy::unwrap_used)]

use foodies_api_server::database::{Database, RecipeFilter};
use foodies_api_server::models::{
    Area, Category, Ingredient, NewRecipe, Recipe, RecipeIngredient, User,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Row;
use uuid::Uuid;

struct TestData {
    db: Database,
    owner: User,
    other: User,
    indian: Area,
    italian: Area,
    chicken: Category,
    pasta: Category,
    garlic: Ingredient,
    spaghetti: Ingredient,
}

async fn create_test_db() -> TestData {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = Database::from_pool(pool).await.unwrap();

    let owner = User::new(
        "Olena".into(),
        "olena@example.com".into(),
        "$2b$12$hash".into(),
        None,
    );
    let other = User::new(
        "Marco".into(),
        "marco@example.com".into(),
        "$2b$12$hash".into(),
        None,
    );
    db.create_user(&owner).await.unwrap();
    db.create_user(&other).await.unwrap();

    let indian = Area::new("Indian");
    let italian = Area::new("Italian");
    db.insert_area(&indian).await.unwrap();
    db.insert_area(&italian).await.unwrap();

    let chicken = Category::new("Chicken", None);
    let pasta = Category::new("Pasta", Some("images/pasta.jpg".into()));
    db.insert_category(&chicken).await.unwrap();
    db.insert_category(&pasta).await.unwrap();

    let garlic = Ingredient::new("Garlic", None, Some("Aromatic bulb".into()));
    let spaghetti = Ingredient::new("Spaghetti", None, None);
    db.insert_ingredient(&garlic).await.unwrap();
    db.insert_ingredient(&spaghetti).await.unwrap();

    TestData {
        db,
        owner,
        other,
        indian,
        italian,
        chicken,
        pasta,
        garlic,
        spaghetti,
    }
}

fn curry(data: &TestData) -> (Recipe, Vec<RecipeIngredient>) {
    let recipe = Recipe::new(
        data.owner.id,
        NewRecipe {
            title: "Chicken Curry".into(),
            description: Some("Spicy".into()),
            instructions: Some("Simmer for 30 minutes.".into()),
            thumb: None,
            time: Some("45 min".into()),
            category_id: data.chicken.id,
            area_id: Some(data.indian.id),
        },
    );
    let pairings = vec![RecipeIngredient {
        ingredient_id: data.garlic.id,
        measure: Some("3 cloves".into()),
    }];
    (recipe, pairings)
}

fn carbonara(data: &TestData) -> (Recipe, Vec<RecipeIngredient>) {
    let recipe = Recipe::new(
        data.other.id,
        NewRecipe {
            title: "Spaghetti".into(),
            description: None,
            instructions: None,
            thumb: None,
            time: Some("15 min".into()),
            category_id: data.pasta.id,
            area_id: Some(data.italian.id),
        },
    );
    let pairings = vec![
        RecipeIngredient {
            ingredient_id: data.spaghetti.id,
            measure: Some("400 g".into()),
        },
        RecipeIngredient {
            ingredient_id: data.garlic.id,
            measure: None,
        },
    ];
    (recipe, pairings)
}

#[tokio::test]
async fn test_create_and_detail() {
    let data = create_test_db().await;
    let (recipe, pairings) = curry(&data);

    let id = data.db.create_recipe(&recipe, &pairings).await.unwrap();
    assert_eq!(id, recipe.id);

    let detail = data.db.get_recipe_detail(id).await.unwrap().unwrap();
    assert_eq!(detail.title, "Chicken Curry");
    assert_eq!(detail.owner.id, data.owner.id);
    assert_eq!(detail.owner.email, "olena@example.com");
    assert_eq!(detail.category.name, "Chicken");
    assert_eq!(detail.area.as_ref().unwrap().name, "Indian");
    assert_eq!(detail.ingredients.len(), 1);
    assert_eq!(detail.ingredients[0].name, "Garlic");
    assert_eq!(detail.ingredients[0].measure.as_deref(), Some("3 cloves"));
}

#[tokio::test]
async fn test_detail_of_unknown_recipe_is_none() {
    let data = create_test_db().await;
    assert!(data
        .db
        .get_recipe_detail(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let data = create_test_db().await;
    let (first, p1) = curry(&data);
    data.db.create_recipe(&first, &p1).await.unwrap();
    let (second, p2) = carbonara(&data);
    data.db.create_recipe(&second, &p2).await.unwrap();

    let listed = data
        .db
        .list_recipes(RecipeFilter::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_filters() {
    let data = create_test_db().await;
    let (curry_recipe, p1) = curry(&data);
    data.db.create_recipe(&curry_recipe, &p1).await.unwrap();
    let (pasta_recipe, p2) = carbonara(&data);
    data.db.create_recipe(&pasta_recipe, &p2).await.unwrap();

    // By category
    let by_category = data
        .db
        .list_recipes(
            RecipeFilter {
                category_id: Some(data.pasta.id),
                ..RecipeFilter::default()
            },
            10,
            0,
        )
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, pasta_recipe.id);

    // By area
    let by_area = data
        .db
        .list_recipes(
            RecipeFilter {
                area_id: Some(data.indian.id),
                ..RecipeFilter::default()
            },
            10,
            0,
        )
        .await
        .unwrap();
    assert_eq!(by_area.len(), 1);
    assert_eq!(by_area[0].id, curry_recipe.id);

    // By ingredient: garlic appears in both, spaghetti only in one
    let filter = RecipeFilter {
        ingredient_id: Some(data.garlic.id),
        ..RecipeFilter::default()
    };
    assert_eq!(data.db.count_recipes(filter).await.unwrap(), 2);

    let by_spaghetti = RecipeFilter {
        ingredient_id: Some(data.spaghetti.id),
        ..RecipeFilter::default()
    };
    assert_eq!(data.db.count_recipes(by_spaghetti).await.unwrap(), 1);

    // By owner
    let own = RecipeFilter {
        owner_id: Some(data.owner.id),
        ..RecipeFilter::default()
    };
    let owned = data.db.list_recipes(own, 10, 0).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, curry_recipe.id);

    // Combined filters match nothing
    let none = RecipeFilter {
        category_id: Some(data.pasta.id),
        area_id: Some(data.indian.id),
        ..RecipeFilter::default()
    };
    assert_eq!(data.db.count_recipes(none).await.unwrap(), 0);
}

#[tokio::test]
async fn test_pagination_window() {
    let data = create_test_db().await;
    for _ in 0..5 {
        let (recipe, pairings) = curry(&data);
        data.db.create_recipe(&recipe, &pairings).await.unwrap();
    }

    let first_page = data
        .db
        .list_recipes(RecipeFilter::default(), 2, 0)
        .await
        .unwrap();
    assert_eq!(first_page.len(), 2);
    let last_page = data
        .db
        .list_recipes(RecipeFilter::default(), 2, 4)
        .await
        .unwrap();
    assert_eq!(last_page.len(), 1);
    assert_eq!(
        data.db.count_recipes(RecipeFilter::default()).await.unwrap(),
        5
    );
}

#[tokio::test]
async fn test_delete_cascades_pairings_and_favorites() {
    let data = create_test_db().await;
    let (recipe, pairings) = curry(&data);
    data.db.create_recipe(&recipe, &pairings).await.unwrap();
    data.db
        .create_favorite(data.other.id, recipe.id)
        .await
        .unwrap();

    assert!(data.db.delete_recipe(recipe.id).await.unwrap());
    assert!(data.db.get_recipe(recipe.id).await.unwrap().is_none());

    let pairing_count: i64 =
        sqlx::query("SELECT COUNT(*) AS count FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe.id.to_string())
            .fetch_one(data.db.pool())
            .await
            .unwrap()
            .get("count");
    assert_eq!(pairing_count, 0);

    let favorite_count: i64 =
        sqlx::query("SELECT COUNT(*) AS count FROM favorites WHERE recipe_id = $1")
            .bind(recipe.id.to_string())
            .fetch_one(data.db.pool())
            .await
            .unwrap()
            .get("count");
    assert_eq!(favorite_count, 0);

    // Deleting again reports nothing removed
    assert!(!data.db.delete_recipe(recipe.id).await.unwrap());
}
