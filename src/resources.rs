// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Manages shared resources: database, auth manager, auth middleware, config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Routes
//! receive an `Arc<ServerResources>` as axum state instead of
//! recreating managers per request.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::middleware::AuthMiddleware;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Shared database handle
    pub database: Arc<Database>,
    /// JWT session manager
    pub auth_manager: Arc<AuthManager>,
    /// Request authentication middleware
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);
        let auth_middleware = Arc::new(AuthMiddleware::new(
            auth_manager.clone(),
            database.clone(),
        ));

        Self {
            database,
            auth_manager,
            auth_middleware,
            config,
        }
    }
}
