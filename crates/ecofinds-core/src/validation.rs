//! # Validation Module
//!
//! Input validation for the add-product, sign-in and profile forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                 │
//! │  └── `required` attributes, immediate feedback                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductForm::into_draft                                      │
//! │  └── Blank fields, category name, price format                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE (called by the stores)                           │
//! │  └── Trimming, lengths, positive price, credentials                    │
//! │                                                                         │
//! │  A failure at any layer aborts the operation with nothing stored.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductDraft;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a listing title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a listing description.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Maximum length of a search query.
pub const MAX_QUERY_LEN: usize = 100;

/// Highest listing price ($1,000,000.00).
///
/// ## Business Reason
/// Keeps every cart, listing and purchase total far inside `i64` cents.
pub const MAX_PRICE: Money = Money::from_dollars(1_000_000);

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and rejects it when blank or longer than `max` characters.
///
/// ## Example
/// ```rust
/// use ecofinds_core::validation::required_trimmed;
///
/// assert_eq!(required_trimmed("title", "  Lamp ", 200).unwrap(), "Lamp");
/// assert!(required_trimmed("title", "   ", 200).is_err());
/// ```
pub fn required_trimmed(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates and normalizes a listing draft before it is stored.
///
/// ## Rules
/// - Title and description are trimmed and must not be blank
/// - Price must be strictly positive and at most [`MAX_PRICE`]
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Add Product form submitted                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_product_draft ← THIS FUNCTION                                │
/// │       │                                                                 │
/// │       ├── blank title?      → "title is required"                      │
/// │       ├── price <= 0?       → "price must be positive"                 │
/// │       ├── price > MAX_PRICE → "price must be at most $1000000.00"      │
/// │       │                                                                 │
/// │       └── OK → CatalogStore prepends the listing                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_product_draft(draft: ProductDraft) -> ValidationResult<ProductDraft> {
    let title = required_trimmed("title", &draft.title, MAX_TITLE_LEN)?;
    let description = required_trimmed("description", &draft.description, MAX_DESCRIPTION_LEN)?;

    if !draft.price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if draft.price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_PRICE.to_string(),
        });
    }

    Ok(ProductDraft {
        title,
        description,
        ..draft
    })
}

/// Validates sign-in input. The mock session accepts any non-empty pair.
pub fn validate_credentials(email: &str, password: &str) -> ValidationResult<String> {
    let email = required_trimmed("email", email, 254)?;

    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    Ok(email)
}

/// Validates profile fields, returning the trimmed `(username, email)`.
pub fn validate_profile(username: &str, email: &str) -> ValidationResult<(String, String)> {
    let username = required_trimmed("username", username, 100)?;
    let email = required_trimmed("email", email, 254)?;
    Ok((username, email))
}

// =============================================================================
// Unit Tests
// =============================================================================
