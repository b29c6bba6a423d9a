// ABOUTME: Server binary for the Foodies recipe-sharing API
// ABOUTME: Production-ready entry point with environment configuration and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! # Foodies API Server Binary
//!
//! This binary starts the Foodies REST API with user authentication,
//! recipe storage, and static file serving.

use anyhow::Result;
use clap::Parser;
use foodies_api_server::{
    auth::AuthManager, config::environment::ServerConfig, database::Database, logging,
    resources::ServerResources, server::FoodiesServer, uploads,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "foodies-api-server")]
#[command(about = "Foodies API - recipe sharing REST backend")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url =
            foodies_api_server::config::environment::DatabaseUrl::parse_url(&database_url);
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Foodies API");
    info!("{}", config.summary());

    // Upload directories must exist before the static file service mounts them
    uploads::ensure_dir(&config.uploads.avatars_dir()).await?;
    uploads::ensure_dir(&config.uploads.recipe_thumbs_dir()).await?;

    // Initialize database and run migrations
    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized successfully");

    // Initialize authentication manager
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes().to_vec(),
        config.auth.jwt_expiry_hours,
    );
    info!("Authentication manager initialized");

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));

    FoodiesServer::new(resources).run().await?;

    Ok(())
}
