// ABOUTME: Application-wide constants for error messages and operational limits
// ABOUTME: Centralizes user-facing strings and tunable numeric defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Shared constants used across routes, middleware, and the database layer.

/// User-facing error messages
pub mod error_messages {
    /// Email address failed shape validation
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
    /// Password shorter than the minimum length
    pub const PASSWORD_TOO_WEAK: &str = "Password must be at least 6 characters";
    /// Registration attempted with an email that already has an account
    pub const EMAIL_IN_USE: &str = "Email in use";
    /// Login failed; deliberately does not say which of the two was wrong
    pub const INVALID_CREDENTIALS: &str = "Email or password is wrong";
    /// Request lacked a valid session
    pub const NOT_AUTHORIZED: &str = "Not authorized";
    /// Name field missing or empty on registration
    pub const NAME_REQUIRED: &str = "Name is required";
}

/// Operational limits and defaults
pub mod limits {
    /// JWT session lifetime in hours
    pub const DEFAULT_SESSION_HOURS: i64 = 24;
    /// Page size applied when the client does not send `limit`
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    /// Upper bound on client-requested page sizes
    pub const MAX_PAGE_SIZE: i64 = 100;
    /// Minimum accepted password length
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Default cap for multipart upload bodies (5 MiB)
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
}
