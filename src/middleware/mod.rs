// ABOUTME: HTTP middleware organization for the Foodies API
// ABOUTME: Request authentication and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! HTTP middleware for request authentication and cross-origin access.

/// Bearer token authentication middleware
pub mod auth;
/// CORS layer configuration
pub mod cors;

pub use auth::AuthMiddleware;
pub use cors::setup_cors;
