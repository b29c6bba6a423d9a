// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Environment-based configuration management for production deployment

use crate::constants::limits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose debugging output
    Debug,
    /// Maximum verbosity
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to an sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where the SQLite database lives
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Session lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// Upload and static file configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory served at `/public`
    pub public_dir: PathBuf,
    /// Maximum accepted multipart body size in bytes
    pub max_upload_bytes: usize,
}

impl UploadConfig {
    /// Directory that stores user avatars
    #[must_use]
    pub fn avatars_dir(&self) -> PathBuf {
        self.public_dir.join("avatars")
    }

    /// Directory that stores recipe thumbnails
    #[must_use]
    pub fn recipe_thumbs_dir(&self) -> PathBuf {
        self.public_dir.join("recipes")
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated origin list, or "*" for any
    pub allowed_origins: String,
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Externally visible base URL, used to absolutize stored asset paths
    pub app_base_url: String,
    /// Deployment environment
    pub environment: Environment,
    /// Log verbosity
    pub log_level: LogLevel,
    /// Database settings
    pub database: DatabaseConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Upload settings
    pub uploads: UploadConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable fails to parse, or if
    /// `JWT_SECRET` is missing in a production environment.
    pub fn from_env() -> Result<Self> {
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse::<u16>()
            .context("Invalid HTTP_PORT")?;

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                anyhow::bail!("JWT_SECRET must be set in production")
            }
            _ => {
                warn!("JWT_SECRET not set, using development default");
                "foodies-dev-secret".into()
            }
        };

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| limits::DEFAULT_SESSION_HOURS.to_string())
            .parse::<i64>()
            .context("Invalid JWT_EXPIRY_HOURS")?;

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| limits::DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse::<usize>()
            .context("Invalid MAX_UPLOAD_BYTES")?;

        let app_base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{http_port}"));

        Ok(Self {
            http_port,
            app_base_url,
            environment,
            log_level: LogLevel::from_str_or_default(
                &env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            ),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(
                    &env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:data/foodies.db".into()),
                ),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            uploads: UploadConfig {
                public_dir: PathBuf::from(
                    env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into()),
                ),
                max_upload_bytes,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into()),
            },
        })
    }

    /// One-line configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} database={} public_dir={} base_url={}",
            self.environment,
            self.http_port,
            self.database.url.to_connection_string(),
            self.uploads.public_dir.display(),
            self.app_base_url,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert!(matches!(
            DatabaseUrl::parse_url("sqlite::memory:"),
            DatabaseUrl::Memory
        ));
        let DatabaseUrl::SQLite { path } = DatabaseUrl::parse_url("sqlite:data/foodies.db") else {
            panic!("expected file-backed database");
        };
        assert_eq!(path, PathBuf::from("data/foodies.db"));
    }

    #[test]
    fn test_database_url_round_trip() {
        let url = DatabaseUrl::parse_url("sqlite:data/foodies.db");
        assert_eq!(url.to_connection_string(), "sqlite:data/foodies.db");
        assert_eq!(
            DatabaseUrl::Memory.to_connection_string(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("unknown"),
            Environment::Development
        );
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }
}
