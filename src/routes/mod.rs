// ABOUTME: Route module organization for Foodies API HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Route module for the Foodies API
//!
//! This module organizes all HTTP routes by domain for better
//! maintainability and clear separation of concerns. Each domain module
//! contains route definitions and thin handler functions that delegate
//! to the database layer.

/// Authentication and session routes
pub mod auth;
/// Health check and system status routes
pub mod health;
/// Public lookup table routes (areas, categories, ingredients, testimonials)
pub mod lookup;
/// Recipe CRUD, search, and favorite routes
pub mod recipes;
/// User profile and social graph routes
pub mod users;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Authentication service
pub use auth::AuthService;
/// Login request payload
pub use auth::LoginRequest;
/// Registration request payload
pub use auth::RegisterRequest;
/// Health check route handlers
pub use health::HealthRoutes;
/// Lookup route handlers
pub use lookup::LookupRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;
/// User route handlers
pub use users::UserRoutes;
