// ABOUTME: Main library entry point for the Foodies recipe-sharing API
// ABOUTME: Provides REST endpoints for auth, recipes, lookups, and social features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

#![deny(unsafe_code)]

//! # Foodies API Server
//!
//! REST backend for the Foodies recipe-sharing application. The server
//! exposes user registration and JWT authentication, recipe CRUD with
//! per-recipe ingredient pairings, static lookup tables (areas,
//! categories, ingredients, testimonials), follow/favorite social
//! relationships, and file-based avatar/thumbnail uploads served from
//! a public directory.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers organized per domain, delegating to
//!   the database layer
//! - **Database**: a `SqlitePool` wrapper with idempotent schema
//!   migration, split into per-domain operation files
//! - **Auth**: HS256 JWT sessions with stored-token invalidation
//! - **Config**: environment-only configuration for production
//!   deployment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use foodies_api_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Foodies API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and session token management
pub mod auth;

/// Configuration management from environment variables
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Database management over SQLite
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for authentication and CORS
pub mod middleware;

/// Common data models for users, recipes, and lookup tables
pub mod models;

/// Offset/limit pagination helpers
pub mod pagination;

/// Shared server resource container for dependency injection
pub mod resources;

/// HTTP routes for all REST endpoints
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Multipart upload persistence helpers
pub mod uploads;
