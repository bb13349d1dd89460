//! # Error Types
//!
//! Domain-specific error types for ecofinds-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ecofinds-core errors (this file)                                      │
//! │  ├── CoreError        - Domain failures (ownership, session, cart)     │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - Key-value store failures                       │
//! │                                                                         │
//! │  ecofinds-shell errors (in app)                                        │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend alert         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation either applies fully or aborts with one of these; there
//! are no partial failures and nothing is retried.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Marketplace domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - Opening or buying a listing that was deleted by its owner
    /// - Deleting an id that was never listed
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A user tried to delete a listing owned by someone else.
    ///
    /// ## User Workflow
    /// ```text
    /// delete_product("3", requester: "user1")
    ///      │
    ///      ▼
    /// stored seller_id = "user4" ≠ "user1"
    ///      │
    ///      ▼
    /// Unauthorized { product_id: "3", requester_id: "user1" }
    /// ```
    #[error("User {requester_id} is not allowed to modify product {product_id}")]
    Unauthorized {
        product_id: String,
        requester_id: String,
    },

    /// The operation needs a logged-in user.
    #[error("You must be signed in to do that")]
    NotAuthenticated,

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Adding one more unit would pass the per-line limit.
    #[error("Quantity of {product_id} cannot exceed {max}")]
    QuantityLimit { product_id: String, max: u32 },

    /// The cart already holds the maximum number of distinct products.
    #[error("Cart cannot have more than {max} items")]
    CartFull { max: usize },

    /// A seller tried to buy their own listing.
    #[error("You cannot add your own listing {0} to the cart")]
    OwnListing(String),

    /// The session store failed.
    #[error("Session storage error: {0}")]
    Storage(#[from] StoreError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These surface as a blocking notification on the form that produced
/// them; nothing is stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is above its upper limit.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures of a [`crate::session::KeyValueStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Unauthorized {
            product_id: "3".to_string(),
            requester_id: "user1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "User user1 is not allowed to modify product 3"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("title").to_string(), "title is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("email").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_json_error_converts_to_store_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let store_err: StoreError = json_err.into();
        assert!(matches!(store_err, StoreError::Serialization(_)));
    }
}
