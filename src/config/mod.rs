// ABOUTME: Configuration module organization for the Foodies API
// ABOUTME: Environment-based configuration is the only supported source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Configuration management for production deployment.

/// Environment variable based server configuration
pub mod environment;
