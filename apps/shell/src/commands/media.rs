//! # Media Commands
//!
//! Image picking for the Add Product form.

use std::path::Path;

use tracing::{debug, info};

use crate::error::ApiError;
use crate::image;

/// Reads an image file and returns it as a `data:` URL.
///
/// ## Errors
/// - `NOT_FOUND` when the path does not exist
/// - `VALIDATION_ERROR` when the file is too large
pub async fn load_image(path: &Path) -> Result<String, ApiError> {
    debug!(?path, "load_image command");
    let data_url = image::load_image(path).await?;
    info!(?path, encoded_len = data_url.len(), "Image loaded");
    Ok(data_url)
}
