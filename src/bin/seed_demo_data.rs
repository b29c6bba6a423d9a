// ABOUTME: Demo data seeder for the Foodies API
// ABOUTME: Populates lookup tables and creates demo users with sample recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Demo data seeder for the Foodies API.
//!
//! This binary populates the database with the lookup tables the client
//! depends on (areas, categories, ingredients, testimonials) and a set
//! of demo users with sample recipes and social relationships.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Reset seeded data first
//! cargo run --bin seed-demo-data -- --reset
//! ```

use anyhow::Result;
use clap::Parser;
use foodies_api_server::database::Database;
use foodies_api_server::models::{
    Area, Category, Ingredient, NewRecipe, Recipe, RecipeIngredient, Testimonial, User,
};
use foodies_api_server::routes::AuthService;
use std::env;
use tracing::info;
use uuid::Uuid;

/// Default password for all demo users - allows login for testing.
const DEMO_USER_PASSWORD: &str = "FoodiesDemo123";

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Foodies API Demo Data Seeder",
    long_about = "Populate the database with lookup tables and demo users/recipes"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Delete previously seeded data before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

const AREAS: &[&str] = &[
    "American", "British", "Chinese", "French", "Greek", "Indian", "Italian", "Japanese",
    "Mexican", "Moroccan", "Spanish", "Thai", "Ukrainian",
];

const CATEGORIES: &[(&str, &str)] = &[
    ("Beef", "images/categories/beef.jpg"),
    ("Breakfast", "images/categories/breakfast.jpg"),
    ("Chicken", "images/categories/chicken.jpg"),
    ("Dessert", "images/categories/dessert.jpg"),
    ("Lamb", "images/categories/lamb.jpg"),
    ("Pasta", "images/categories/pasta.jpg"),
    ("Pork", "images/categories/pork.jpg"),
    ("Seafood", "images/categories/seafood.jpg"),
    ("Side", "images/categories/side.jpg"),
    ("Starter", "images/categories/starter.jpg"),
    ("Vegan", "images/categories/vegan.jpg"),
    ("Vegetarian", "images/categories/vegetarian.jpg"),
];

const INGREDIENTS: &[(&str, &str)] = &[
    ("Chicken Breast", "Lean white meat from the chicken"),
    ("Garlic", "Pungent bulb used as a base aromatic"),
    ("Onion", "Sharp aromatic bulb, sweet when cooked"),
    ("Tomato", "Juicy red fruit used in sauces and salads"),
    ("Olive Oil", "Oil pressed from olives"),
    ("Basmati Rice", "Long-grain aromatic rice"),
    ("Spaghetti", "Long thin Italian pasta"),
    ("Parmesan", "Hard aged Italian cheese"),
    ("Butter", "Churned dairy fat"),
    ("Flour", "Finely ground wheat"),
    ("Egg", "Chicken egg"),
    ("Milk", "Whole cow's milk"),
    ("Sugar", "Refined white sugar"),
    ("Salt", "Sea salt"),
    ("Black Pepper", "Ground dried peppercorns"),
    ("Curry Powder", "Ground spice blend for curries"),
    ("Coconut Milk", "Pressed coconut flesh in water"),
    ("Lemon", "Sour yellow citrus"),
    ("Salmon", "Rich pink-fleshed fish"),
    ("Avocado", "Creamy green fruit"),
];

const TESTIMONIALS: &[&str] = &[
    "Thank you for the wonderful recipes! Cooking dinner is finally something I look forward to.",
    "Foodies completely changed how our family eats. The ingredient search is brilliant.",
    "I found three new favorite dishes in my first week. The community is lovely.",
];

struct DemoUser {
    name: &'static str,
    email: &'static str,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Olena Kovalenko",
        email: "olena@foodies.demo",
    },
    DemoUser {
        name: "Marco Rossi",
        email: "marco@foodies.demo",
    },
    DemoUser {
        name: "Priya Sharma",
        email: "priya@foodies.demo",
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(level).init();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:data/foodies.db".into());

    info!("Seeding database: {database_url}");
    let database = Database::new(&database_url).await?;

    if args.reset {
        reset(&database).await?;
    }

    seed_lookup_tables(&database).await?;
    let users = seed_users(&database).await?;
    seed_recipes(&database, &users).await?;
    seed_social(&database, &users).await?;

    info!("Seeding complete");
    Ok(())
}

async fn reset(database: &Database) -> Result<()> {
    info!("Resetting seeded data");
    for table in [
        "favorites",
        "follows",
        "recipe_ingredients",
        "recipes",
        "testimonials",
        "ingredients",
        "categories",
        "areas",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(database.pool())
            .await?;
    }
    Ok(())
}

async fn seed_lookup_tables(database: &Database) -> Result<()> {
    for name in AREAS {
        database.insert_area(&Area::new(*name)).await?;
    }
    info!("Seeded {} areas", AREAS.len());

    for (name, thumb) in CATEGORIES {
        database
            .insert_category(&Category::new(*name, Some((*thumb).into())))
            .await?;
    }
    info!("Seeded {} categories", CATEGORIES.len());

    if database.list_ingredients().await?.is_empty() {
        for (name, description) in INGREDIENTS {
            database
                .insert_ingredient(&Ingredient::new(*name, None, Some((*description).into())))
                .await?;
        }
    }
    info!("Seeded {} ingredients", INGREDIENTS.len());

    if database.list_testimonials().await?.is_empty() {
        for text in TESTIMONIALS {
            database.insert_testimonial(&Testimonial::new(*text)).await?;
        }
    }
    info!("Seeded {} testimonials", TESTIMONIALS.len());

    Ok(())
}

async fn seed_users(database: &Database) -> Result<Vec<Uuid>> {
    let password_hash = bcrypt::hash(DEMO_USER_PASSWORD, bcrypt::DEFAULT_COST)?;

    let mut ids = Vec::with_capacity(DEMO_USERS.len());
    for demo in DEMO_USERS {
        if let Some(existing) = database.get_user_by_email(demo.email).await? {
            ids.push(existing.id);
            continue;
        }

        let avatar_url = Some(AuthService::gravatar_url(demo.email));
        let user = User::new(
            demo.name.into(),
            demo.email.into(),
            password_hash.clone(),
            avatar_url,
        );
        database.create_user(&user).await?;
        info!("Created demo user {} ({})", demo.email, user.id);
        ids.push(user.id);
    }

    Ok(ids)
}

async fn seed_recipes(database: &Database, users: &[Uuid]) -> Result<()> {
    if database.count_recipes(Default::default()).await? > 0 {
        info!("Recipes already present, skipping recipe seed");
        return Ok(());
    }

    let areas = database.list_areas().await?;
    let categories = database.list_categories().await?;
    let ingredients = database.list_ingredients().await?;

    let area_id = |name: &str| areas.iter().find(|a| a.name == name).map(|a| a.id);
    let category_id = |name: &str| {
        categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| anyhow::anyhow!("missing category {name}"))
    };
    let ingredient = |name: &str, measure: &str| -> Result<RecipeIngredient> {
        let found = ingredients
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| anyhow::anyhow!("missing ingredient {name}"))?;
        Ok(RecipeIngredient {
            ingredient_id: found.id,
            measure: Some(measure.into()),
        })
    };

    let samples = [
        (
            users[0],
            NewRecipe {
                title: "Chicken Curry".into(),
                description: Some("Fragrant curry with coconut milk.".into()),
                instructions: Some(
                    "Brown the chicken, soften the onion and garlic, add curry powder, \
                     pour in the coconut milk and simmer for 30 minutes. Serve over rice."
                        .into(),
                ),
                thumb: None,
                time: Some("45 min".into()),
                category_id: category_id("Chicken")?,
                area_id: area_id("Indian"),
            },
            vec![
                ingredient("Chicken Breast", "500 g")?,
                ingredient("Onion", "1 large")?,
                ingredient("Garlic", "3 cloves")?,
                ingredient("Curry Powder", "2 tbsp")?,
                ingredient("Coconut Milk", "400 ml")?,
                ingredient("Basmati Rice", "300 g")?,
            ],
        ),
        (
            users[1],
            NewRecipe {
                title: "Spaghetti al Burro".into(),
                description: Some("Four ingredients, ten minutes.".into()),
                instructions: Some(
                    "Cook the spaghetti until al dente. Toss with butter, a ladle of \
                     pasta water, and plenty of parmesan and black pepper."
                        .into(),
                ),
                thumb: None,
                time: Some("15 min".into()),
                category_id: category_id("Pasta")?,
                area_id: area_id("Italian"),
            },
            vec![
                ingredient("Spaghetti", "400 g")?,
                ingredient("Butter", "80 g")?,
                ingredient("Parmesan", "60 g")?,
                ingredient("Black Pepper", "to taste")?,
            ],
        ),
        (
            users[2],
            NewRecipe {
                title: "Citrus Baked Salmon".into(),
                description: Some("Weeknight salmon with lemon and olive oil.".into()),
                instructions: Some(
                    "Lay the salmon on a tray, season with salt, drizzle with olive oil \
                     and lemon juice, and bake at 200C for 12-14 minutes."
                        .into(),
                ),
                thumb: None,
                time: Some("20 min".into()),
                category_id: category_id("Seafood")?,
                area_id: area_id("French"),
            },
            vec![
                ingredient("Salmon", "2 fillets")?,
                ingredient("Lemon", "1")?,
                ingredient("Olive Oil", "2 tbsp")?,
                ingredient("Salt", "to taste")?,
            ],
        ),
    ];

    for (owner, params, pairings) in samples {
        let recipe = Recipe::new(owner, params);
        database.create_recipe(&recipe, &pairings).await?;
        info!("Created recipe '{}' ({})", recipe.title, recipe.id);
    }

    Ok(())
}

async fn seed_social(database: &Database, users: &[Uuid]) -> Result<()> {
    // A small follow ring plus one favorite each, ignoring duplicates on re-runs
    let edges = [(0, 1), (1, 2), (2, 0), (0, 2)];
    for (a, b) in edges {
        if !database.is_following(users[a], users[b]).await? {
            database.create_follow(users[a], users[b]).await?;
        }
    }

    let recipes = database
        .list_recipes(Default::default(), 10, 0)
        .await?;
    for (i, recipe) in recipes.iter().enumerate() {
        let user = users[i % users.len()];
        if user != recipe.owner.id && !database.is_favorited(user, recipe.id).await? {
            database.create_favorite(user, recipe.id).await?;
        }
    }

    info!("Seeded social relationships");
    Ok(())
}
