// ABOUTME: Multipart upload persistence: naming, extension allowlist, directory bootstrap
// ABOUTME: Stores avatar and recipe thumbnail images under the public directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodies

//! Upload persistence helpers for avatar and recipe thumbnail images.
//!
//! Uploaded files are written directly to their destination directory
//! with a `{user_id}_{timestamp}.{ext}` name, so concurrent uploads by
//! the same user cannot collide and file names never contain
//! client-controlled path segments.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use std::path::Path;
use uuid::Uuid;

/// Image extensions accepted for avatar and thumbnail uploads
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Extract and validate the lowercase extension of an uploaded file name
///
/// # Errors
///
/// Returns an error if the file name has no extension or the extension
/// is not an allowed image type
pub fn image_extension(file_name: &str) -> AppResult<String> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| AppError::invalid_input("Uploaded file has no extension"))?;

    if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::invalid_input(format!(
            "Unsupported image type: .{ext}"
        )))
    }
}

/// Create a directory (and parents) if it does not exist yet
///
/// # Errors
///
/// Returns an error if directory creation fails
pub async fn ensure_dir(dir: &Path) -> AppResult<()> {
    if tokio::fs::metadata(dir).await.is_err() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create {}: {e}", dir.display())))?;
    }
    Ok(())
}

/// Persist an uploaded image and return the stored file name
///
/// # Errors
///
/// Returns an error if the extension is rejected or the write fails
pub async fn save_image(
    dir: &Path,
    user_id: Uuid,
    original_name: &str,
    data: &[u8],
) -> AppResult<String> {
    let ext = image_extension(original_name)?;
    ensure_dir(dir).await?;

    let file_name = format!("{user_id}_{}.{ext}", Utc::now().timestamp_millis());
    let path = dir.join(&file_name);

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", path.display())))?;

    tracing::debug!(file = %path.display(), bytes = data.len(), "Stored uploaded image");
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allowlist() {
        assert_eq!(image_extension("photo.JPG").unwrap(), "jpg");
        assert_eq!(image_extension("thumb.webp").unwrap(), "webp");
        assert!(image_extension("script.sh").is_err());
        assert!(image_extension("noext").is_err());
    }

    #[tokio::test]
    async fn test_save_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("avatars");
        let user_id = Uuid::new_v4();

        let name = save_image(&nested, user_id, "me.png", b"png-bytes")
            .await
            .unwrap();

        assert!(name.starts_with(&user_id.to_string()));
        assert!(name.ends_with(".png"));
        let stored = tokio::fs::read(nested.join(&name)).await.unwrap();
        assert_eq!(stored, b"png-bytes");
    }

    #[tokio::test]
    async fn test_save_image_rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_image(dir.path(), Uuid::new_v4(), "evil.exe", b"bytes")
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 400);
    }
}
