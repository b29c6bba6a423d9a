// ABOUTME: Integration tests for the users database module
// ABOUTME: Covers creation, lookup, session tokens, avatars, and profile counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

#![allow(missing_docs, clippy::unwrap_used)]

use foodies_api_server::database::Database;
use foodies_api_server::models::User;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

async fn create_test_db() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    Database::from_pool(pool).await.unwrap()
}

fn test_user(name: &str, email: &str) -> User {
    User::new(name.into(), email.into(), "$2b$12$testhash".into(), None)
}

#[tokio::test]
async fn test_create_and_get_user() {
    let db = create_test_db().await;
    let user = test_user("Olena", "olena@example.com");

    let id = db.create_user(&user).await.unwrap();
    assert_eq!(id, user.id);

    let fetched = db.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Olena");
    assert_eq!(fetched.email, "olena@example.com");
    assert!(fetched.token.is_none());

    let by_email = db.get_user_by_email("olena@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let db = create_test_db().await;
    db.create_user(&test_user("A", "same@example.com"))
        .await
        .unwrap();

    let err = db
        .create_user(&test_user("B", "same@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 409);
}

#[tokio::test]
async fn test_unknown_user_is_none() {
    let db = create_test_db().await;
    assert!(db.get_user(Uuid::new_v4()).await.unwrap().is_none());
    assert!(db
        .get_user_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_session_token_lifecycle() {
    let db = create_test_db().await;
    let user = test_user("Olena", "olena@example.com");
    db.create_user(&user).await.unwrap();

    db.update_session_token(user.id, Some("jwt-token"))
        .await
        .unwrap();
    let with_token = db.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(with_token.token.as_deref(), Some("jwt-token"));

    db.update_session_token(user.id, None).await.unwrap();
    let logged_out = db.get_user(user.id).await.unwrap().unwrap();
    assert!(logged_out.token.is_none());
}

#[tokio::test]
async fn test_avatar_update() {
    let db = create_test_db().await;
    let user = test_user("Olena", "olena@example.com");
    db.create_user(&user).await.unwrap();

    db.update_avatar_url(user.id, "/public/avatars/x.png")
        .await
        .unwrap();
    let updated = db.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(updated.avatar_url.as_deref(), Some("/public/avatars/x.png"));
}

#[tokio::test]
async fn test_list_and_count_users() {
    let db = create_test_db().await;
    for i in 0..3 {
        db.create_user(&test_user("User", &format!("user{i}@example.com")))
            .await
            .unwrap();
    }

    assert_eq!(db.count_users().await.unwrap(), 3);

    let page = db.list_users(2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    let rest = db.list_users(2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
}

#[tokio::test]
async fn test_stats_for_fresh_user_are_zero() {
    let db = create_test_db().await;
    let user = test_user("Olena", "olena@example.com");
    db.create_user(&user).await.unwrap();

    let stats = db.user_stats(user.id).await.unwrap();
    assert_eq!(stats.created_recipes, 0);
    assert_eq!(stats.favorites, 0);
    assert_eq!(stats.followers, 0);
    assert_eq!(stats.following, 0);
}
