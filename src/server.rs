// ABOUTME: HTTP server assembly: router merge, static files, CORS, tracing, serve loop
// ABOUTME: Owns the axum Router and the tokio TCP listener lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! HTTP server assembly and lifecycle
//!
//! Builds the complete axum application out of the per-domain route
//! structs, attaches the `/public` static file service and the shared
//! middleware stack, then serves it on the configured port.

use crate::errors::{AppError, AppResult};
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, LookupRoutes, RecipeRoutes, UserRoutes};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// The Foodies HTTP server
pub struct FoodiesServer {
    resources: Arc<ServerResources>,
}

impl FoodiesServer {
    /// Create a new server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router
    #[must_use]
    pub fn router(&self) -> Router {
        let config = &self.resources.config;

        Router::new()
            .merge(HealthRoutes::routes())
            .merge(LookupRoutes::routes(self.resources.clone()))
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(UserRoutes::routes(self.resources.clone()))
            .merge(RecipeRoutes::routes(self.resources.clone()))
            .nest_service(
                "/public",
                ServeDir::new(&config.uploads.public_dir),
            )
            .fallback(Self::handle_not_found)
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(config))
            .layer(DefaultBodyLimit::max(config.uploads.max_upload_bytes))
    }

    /// Bind the configured port and serve until the task is cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self) -> AppResult<()> {
        let addr = format!("0.0.0.0:{}", self.resources.config.http_port);
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!("Foodies API listening on {addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }

    /// JSON 404 for unknown routes
    async fn handle_not_found() -> AppError {
        AppError::not_found("Route")
    }
}
