//! Multipart image upload.
//!
//! Files are written once under the upload directory and never mutated.
//! Collision avoidance uses exclusivity-by-uniqueness instead of locking: the
//! stored name carries the upload's unix-millisecond timestamp plus a random
//! suffix, so concurrent uploads of identically named files land in distinct
//! paths without coordination.

use super::AppState;
use crate::error::BlogsmithError;
use axum::{
    extract::{Multipart, State},
    Json,
};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Trailing `.ext` of a filename.
static RE_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.([A-Za-z0-9]+)$").unwrap());

/// Anything we do not want in a stored filename.
static RE_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    success: bool,
    filename: String,
    url: String,
}

pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, BlogsmithError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BlogsmithError::Upload {
            detail: format!("Malformed multipart body: {e}"),
        })?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());
        let data = field.bytes().await.map_err(|e| BlogsmithError::Upload {
            detail: format!("Failed to read upload body: {e}"),
        })?;

        let filename = unique_filename(&original);
        let path = state.upload_dir.join(&filename);

        tokio::fs::create_dir_all(&state.upload_dir)
            .await
            .map_err(|e| BlogsmithError::Upload {
                detail: format!("Failed to create upload dir: {e}"),
            })?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| BlogsmithError::Upload {
                detail: format!("Failed to write '{}': {e}", path.display()),
            })?;

        info!(filename = %filename, bytes = data.len(), "Stored upload");

        return Ok(Json(UploadResponse {
            success: true,
            url: format!("/uploads/{filename}"),
            filename,
        }));
    }

    Err(BlogsmithError::Validation("No file uploaded".into()))
}

/// Derive a unique stored filename from the client-supplied one.
///
/// Path components are stripped (only the final segment is kept), unsafe
/// characters are replaced, and a `-<millis>-<random>` suffix is inserted
/// before the extension.
fn unique_filename(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload");
    let base = RE_UNSAFE.replace_all(base, "-");

    let (stem, extension) = match RE_EXTENSION.captures(&base) {
        Some(caps) => {
            let full = caps.get(0).expect("whole match");
            (&base[..full.start()], Some(caps[1].to_string()))
        }
        None => (base.as_ref(), None),
    };
    let stem = if stem.is_empty() { "upload" } else { stem };

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let noise: u32 = rand::rng().random_range(0..1_000_000_000);

    match extension {
        Some(ext) => format!("{stem}-{millis}-{noise}.{ext}"),
        None => format!("{stem}-{millis}-{noise}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_stem_and_extension() {
        let name = unique_filename("diagram.png");
        assert!(name.starts_with("diagram-"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn strips_path_components() {
        let name = unique_filename("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[test]
    fn replaces_unsafe_characters() {
        let name = unique_filename("my screen shot (1).png");
        assert!(!name.contains(' '));
        assert!(!name.contains('('));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn handles_missing_extension() {
        let name = unique_filename("README");
        assert!(name.starts_with("README-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn successive_names_differ() {
        assert_ne!(unique_filename("a.png"), unique_filename("a.png"));
    }
}
