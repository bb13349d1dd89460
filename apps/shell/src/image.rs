//! # Image Loading
//!
//! Turns a picked file into a `data:` URL the Add Product form can store
//! as the listing's image.
//!
//! ```text
//! /home/me/lamp.png ──► tokio::fs::read ──► base64 ──► "data:image/png;base64,iVBOR..."
//! ```

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// Largest accepted file (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Image is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// MIME type from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Reads `path` and encodes it as a `data:` URL.
///
/// ## Errors
/// - `NotFound` when the file does not exist
/// - `TooLarge` above [`MAX_IMAGE_BYTES`]; the file is not read
pub async fn load_image(path: &Path) -> Result<String, ImageError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImageError::NotFound(path.display().to_string())
        } else {
            ImageError::Io(e)
        }
    })?;

    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size: metadata.len(),
            max: MAX_IMAGE_BYTES,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(format!("data:{};base64,{}", mime_for(path), STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Scratch directory removed when dropped, even if the test fails.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new() -> Self {
            let dir =
                std::env::temp_dir().join(format!("ecofinds-image-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            ScratchDir(dir)
        }

        fn file(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(mime_for(Path::new("a.bin")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_scratch_dir_is_removed_on_drop() {
        let dir = ScratchDir::new();
        let root = dir.0.clone();
        std::fs::write(dir.file("a.png"), b"x").unwrap();
        assert!(root.is_dir());

        drop(dir);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_load_image_data_url() {
        let dir = ScratchDir::new();
        let path = dir.file("pixel.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let url = load_image(&path).await.unwrap();
        assert_eq!(url, "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn test_load_missing_image() {
        let dir = ScratchDir::new();
        let path = dir.file("missing.png");
        assert!(matches!(load_image(&path).await, Err(ImageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_oversized_image() {
        let dir = ScratchDir::new();
        let path = dir.file("huge.jpg");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        assert!(matches!(
            load_image(&path).await,
            Err(ImageError::TooLarge { .. })
        ));
    }
}
