// ABOUTME: HTTP-level smoke tests for the assembled router
// ABOUTME: Drives JSON endpoints end to end with tower oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

#![allow(missing_docs, clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use foodies_api_server::auth::AuthManager;
use foodies_api_server::config::environment::{
    AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    UploadConfig,
};
use foodies_api_server::database::Database;
use foodies_api_server::models::Area;
use foodies_api_server::resources::ServerResources;
use foodies_api_server::server::FoodiesServer;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;

async fn create_test_app() -> (Router, Arc<ServerResources>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let database = Database::from_pool(pool).await.unwrap();

    let config = ServerConfig {
        http_port: 0,
        app_base_url: "http://localhost:5000".into(),
        environment: Environment::Testing,
        log_level: LogLevel::Info,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_expiry_hours: 24,
        },
        uploads: UploadConfig {
            public_dir: PathBuf::from("public"),
            max_upload_bytes: 1024 * 1024,
        },
        cors: CorsConfig {
            allowed_origins: "*".into(),
        },
    };
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes().to_vec(),
        config.auth.jwt_expiry_hours,
    );

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ));
    let router = FoodiesServer::new(resources.clone()).router();

    (router, resources)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(router: &Router, email: &str) -> String {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"name": "Olena", "email": email, "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health_endpoints() {
    let (router, _) = create_test_app().await;

    for uri in ["/health", "/ready"] {
        let response = router.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_register_login_current_flow() {
    let (router, _) = create_test_app().await;
    let token = register(&router, "olena@example.com").await;

    // Session works against /api/auth/current
    let response = router
        .clone()
        .oneshot(get_request("/api/auth/current", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "olena@example.com");
    assert_eq!(body["name"], "Olena");

    // Fresh user has all-zero counters
    let response = router
        .clone()
        .oneshot(get_request("/api/users/current", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["created_recipes"], 0);
    assert_eq!(body["followers"], 0);

    // Login again with the same credentials
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({"email": "olena@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_conflict_and_validation_status_codes() {
    let (router, _) = create_test_app().await;
    register(&router, "olena@example.com").await;

    let conflict = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"name": "Olena", "email": "olena@example.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(conflict.status(), StatusCode::CONFLICT);
    let body = body_json(conflict).await;
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    let invalid = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"name": "X", "email": "bad", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let (router, _) = create_test_app().await;

    for uri in ["/api/recipes", "/api/users", "/api/users/current"] {
        let response = router.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");
    }
}

#[tokio::test]
async fn test_lookup_routes_are_public() {
    let (router, resources) = create_test_app().await;
    resources
        .database
        .insert_area(&Area::new("Indian"))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(get_request("/api/areas", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Indian");

    for uri in ["/api/categories", "/api/ingredients", "/api/testimonials"] {
        let response = router.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
    }
}

#[tokio::test]
async fn test_follow_over_http() {
    let (router, resources) = create_test_app().await;
    let token = register(&router, "olena@example.com").await;
    let other_token = register(&router, "marco@example.com").await;

    // Find marco's id through the session
    let response = router
        .clone()
        .oneshot(get_request("/api/auth/current", Some(&other_token)))
        .await
        .unwrap();
    let marco_id = body_json(response).await["id"].as_str().unwrap().to_owned();

    let follow = Request::builder()
        .method("POST")
        .uri(format!("/api/users/{marco_id}/follow"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(follow).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A second follow conflicts
    let again = Request::builder()
        .method("POST")
        .uri(format!("/api/users/{marco_id}/follow"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(again).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Marco now shows one follower
    let response = router
        .clone()
        .oneshot(get_request(
            &format!("/api/users/{marco_id}"),
            Some(&token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["followers"], 1);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (router, _) = create_test_app().await;

    let response = router
        .clone()
        .oneshot(get_request("/api/nope", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}
