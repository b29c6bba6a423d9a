// ABOUTME: Integration tests for the registration/login/logout session flow
// ABOUTME: Exercises AuthService and the Bearer middleware against an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

#![allow(missing_docs, clippy::unwrap_used)]

use foodies_api_server::auth::AuthManager;
use foodies_api_server::config::environment::{
    AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    UploadConfig,
};
use foodies_api_server::database::Database;
use foodies_api_server::errors::ErrorCode;
use foodies_api_server::resources::ServerResources;
use foodies_api_server::routes::{AuthService, LoginRequest, RegisterRequest};
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use std::sync::Arc;

fn test_config() -> ServerConfig {
    ServerConfig {
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
    }
}

async fn create_test_resources() -> Arc<ServerResources> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let database = Database::from_pool(pool).await.unwrap();

    let config = test_config();
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes().to_vec(),
        config.auth.jwt_expiry_hours,
    );

    Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ))
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        name: "Olena".into(),
        email: "olena@example.com".into(),
        password: "secret123".into(),
    }
}

#[tokio::test]
async fn test_register_issues_working_session() {
    let resources = create_test_resources().await;
    let service = AuthService::new(resources.clone());

    let response = service.register(register_request()).await.unwrap();
    assert_eq!(response.user.email, "olena@example.com");
    assert!(response
        .user
        .avatar_url
        .as_deref()
        .unwrap()
        .starts_with("https://gravatar.com/avatar/"));

    // The returned token authenticates requests
    let header = format!("Bearer {}", response.token);
    let user = resources
        .auth_middleware
        .authenticate_request(Some(&header))
        .await
        .unwrap();
    assert_eq!(user.id, response.user.id);
}

#[tokio::test]
async fn test_register_validation() {
    let resources = create_test_resources().await;
    let service = AuthService::new(resources);

    let mut bad_name = register_request();
    bad_name.name = "   ".into();
    assert_eq!(
        service.register(bad_name).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );

    let mut bad_email = register_request();
    bad_email.email = "not-an-email".into();
    assert_eq!(
        service.register(bad_email).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );

    let mut short_password = register_request();
    short_password.password = "nope".into();
    assert_eq!(
        service.register(short_password).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let resources = create_test_resources().await;
    let service = AuthService::new(resources);

    service.register(register_request()).await.unwrap();
    let err = service.register(register_request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(err.http_status(), 409);
}

#[tokio::test]
async fn test_login_and_wrong_credentials() {
    let resources = create_test_resources().await;
    let service = AuthService::new(resources);

    service.register(register_request()).await.unwrap();

    let ok = service
        .login(LoginRequest {
            email: "olena@example.com".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap();
    assert_eq!(ok.user.name, "Olena");

    let wrong_password = service
        .login(LoginRequest {
            email: "olena@example.com".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(wrong_password.http_status(), 401);

    let unknown_user = service
        .login(LoginRequest {
            email: "nobody@example.com".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(unknown_user.http_status(), 401);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let resources = create_test_resources().await;
    let service = AuthService::new(resources.clone());

    let response = service.register(register_request()).await.unwrap();
    let header = format!("Bearer {}", response.token);

    let user = resources
        .auth_middleware
        .authenticate_request(Some(&header))
        .await
        .unwrap();
    service.logout(&user).await.unwrap();

    // The JWT itself is still unexpired, but the stored token is gone
    let err = resources
        .auth_middleware
        .authenticate_request(Some(&header))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 401);
}

#[tokio::test]
async fn test_new_login_invalidates_previous_session() {
    let resources = create_test_resources().await;
    let service = AuthService::new(resources.clone());

    let first = service.register(register_request()).await.unwrap();
    let second = service
        .login(LoginRequest {
            email: "olena@example.com".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap();
    assert_ne!(first.token, second.token);

    let stale = format!("Bearer {}", first.token);
    assert!(resources
        .auth_middleware
        .authenticate_request(Some(&stale))
        .await
        .is_err());

    let fresh = format!("Bearer {}", second.token);
    assert!(resources
        .auth_middleware
        .authenticate_request(Some(&fresh))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_middleware_rejects_malformed_headers() {
    let resources = create_test_resources().await;

    assert!(resources
        .auth_middleware
        .authenticate_request(None)
        .await
        .is_err());
    assert!(resources
        .auth_middleware
        .authenticate_request(Some("Basic abc"))
        .await
        .is_err());
    assert!(resources
        .auth_middleware
        .authenticate_request(Some("Bearer not-a-jwt"))
        .await
        .is_err());
}
