//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in EcoFinds                               │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  {"cmd":"add_to_cart", ...}                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::Io("...") ────────────┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Domain Error? ─── CoreError::OwnListing ───────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"error":{"code":"CART_ERROR","message":"You cannot add ..."}}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use ecofinds_core::{CoreError, StoreError};

use crate::image::ImageError;
use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// const reply = await send({ cmd: 'add_to_cart', args: { productId } });
/// if (reply.error) {
///   switch (reply.error.code) {
///     case 'NOT_AUTHENTICATED':
///       showLogin();
///       break;
///     case 'VALIDATION_ERROR':
///       alert(reply.error.message);
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Listing or file does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Acting on someone else's listing
    Unauthorized,

    /// Nobody is signed in
    NotAuthenticated,

    /// Cart operation refused
    CartError,

    /// Session store could not be read or written
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Log the actual error but return a generic message
        error!("Session store failed: {}", err);
        ApiError::new(ErrorCode::StorageError, "Could not save your session")
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            e @ CoreError::Unauthorized { .. } => {
                ApiError::new(ErrorCode::Unauthorized, e.to_string())
            }
            e @ CoreError::NotAuthenticated => {
                ApiError::new(ErrorCode::NotAuthenticated, e.to_string())
            }
            e @ (CoreError::EmptyCart
            | CoreError::OwnListing(_)
            | CoreError::QuantityLimit { .. }
            | CoreError::CartFull { .. }) => ApiError::cart(e.to_string()),
            CoreError::Storage(e) => ApiError::from(e),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::NotFound(path) => ApiError::not_found("Image", &path),
            e @ ImageError::TooLarge { .. } => ApiError::validation(e.to_string()),
            ImageError::Io(e) => {
                error!("Image read failed: {}", e);
                ApiError::internal("Could not read the image")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Errors
// =============================================================================

/// Failures that stop the shell from starting.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("Startup failed: {0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
