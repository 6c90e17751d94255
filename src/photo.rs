//! Turns image files into meal photo payloads.

use base64::Engine;
use healthlog_core::PhotoPayload;
use std::fs;
use std::path::{Path, PathBuf};

/// Read an image file into a `data:` URI payload.
///
/// Only common image extensions are accepted, and files larger than
/// `max_bytes` are rejected before being read.
pub fn read_photo(path: &Path, max_bytes: u64) -> Result<PhotoPayload, PhotoError> {
    let mime = image_mime(path).ok_or_else(|| PhotoError::NotAnImage(path.to_path_buf()))?;

    let size = fs::metadata(path)
        .map_err(|e| PhotoError::ReadError(path.to_path_buf(), e))?
        .len();
    if size > max_bytes {
        return Err(PhotoError::TooLarge(path.to_path_buf(), size, max_bytes));
    }

    let bytes = fs::read(path).map_err(|e| PhotoError::ReadError(path.to_path_buf(), e))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    tracing::debug!("Read photo {} ({} bytes)", path.display(), bytes.len());

    Ok(PhotoPayload::new(format!("data:{};base64,{}", mime, encoded)))
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[derive(Debug)]
pub enum PhotoError {
    NotAnImage(PathBuf),
    TooLarge(PathBuf, u64, u64),
    ReadError(PathBuf, std::io::Error),
}

impl std::fmt::Display for PhotoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoError::NotAnImage(path) => {
                write!(f, "Not an image file: {}", path.display())
            }
            PhotoError::TooLarge(path, size, max) => write!(
                f,
                "Image '{}' is {} bytes (limit {})",
                path.display(),
                size,
                max
            ),
            PhotoError::ReadError(path, e) => {
                write!(f, "Failed to read image '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for PhotoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhotoError::ReadError(_, e) => Some(e),
            _ => None,
        }
    }
}
