//! # Domain Types
//!
//! Core domain types used throughout EcoFinds.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Product      │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  seller_id      │   │  Clothing       │       │
//! │  │  username       │   │  title          │──►│  Electronics    │       │
//! │  │  email          │   │  price (Money)  │   │  Furniture ...  │       │
//! │  └─────────────────┘   │  created_at     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ProductForm    │──►│  ProductDraft   │──► CatalogStore::add_product│
//! │  │  (raw strings)  │   │  (typed, valid) │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `seller_id → User.id` is an ownership link only; deleting a user does
//! not cascade to their listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the checkout rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// User
// =============================================================================

/// The signed-in identity. This is also the persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

// =============================================================================
// Category
// =============================================================================

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Clothing,
    Electronics,
    Furniture,
    Books,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Other,
}

impl Category {
    /// Every category, in the order the category picker shows them.
    pub const ALL: [Category; 7] = [
        Category::Clothing,
        Category::Electronics,
        Category::Furniture,
        Category::Books,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Other,
    ];

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Books => "Books",
            Category::HomeAndGarden => "Home & Garden",
            Category::Sports => "Sports",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::required("category"));
        }

        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A listing in the catalog.
///
/// Immutable once created; the only lifecycle event after creation is
/// deletion by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    pub title: String,

    pub category: Category,

    pub description: String,

    /// Price in USD cents.
    pub price: Money,

    /// Owner of the listing (`User.id`).
    pub seller_id: String,

    /// Image URL or `data:` URL of an uploaded picture.
    pub image_url: Option<String>,

    /// When the listing was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether `user_id` owns this listing.
    #[inline]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.seller_id == user_id
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// Typed input for a new listing.
///
/// Identity, owner and timestamp are assigned by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub price: Money,
    pub image_url: Option<String>,
}

/// Raw "Add Product" form values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl ProductForm {
    /// Converts the form into a draft.
    ///
    /// ## Errors
    /// - Any of title, category, description, price blank → `Required`
    /// - Unknown category → `NotAllowed`
    /// - Unparseable price → `InvalidFormat`
    ///
    /// Positivity of the price is checked when the draft is stored.
    pub fn into_draft(self) -> Result<ProductDraft, ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("category", &self.category),
            ("description", &self.description),
            ("price", &self.price),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field));
            }
        }

        Ok(ProductDraft {
            category: self.category.parse()?,
            price: Money::parse_decimal(&self.price)?,
            title: self.title,
            description: self.description,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_default_is_eight_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 800);
        assert!((rate.percentage() - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_category_round_trips_through_label() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert_eq!(
            " Home & Garden ".parse::<Category>().unwrap(),
            Category::HomeAndGarden
        );
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(matches!(
            "Toys".parse::<Category>(),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert_eq!(
            "".parse::<Category>(),
            Err(ValidationError::required("category"))
        );
    }

    #[test]
    fn test_category_serializes_with_display_label() {
        let json = serde_json::to_string(&Category::HomeAndGarden).unwrap();
        assert_eq!(json, "\"Home & Garden\"");
    }

    #[test]
    fn test_form_into_draft() {
        let form = ProductForm {
            title: " Lamp ".to_string(),
            category: "Furniture".to_string(),
            description: "Brass desk lamp".to_string(),
            price: "30.5".to_string(),
            image_url: Some("   ".to_string()),
        };

        let draft = form.into_draft().unwrap();
        assert_eq!(draft.category, Category::Furniture);
        assert_eq!(draft.price.cents(), 3050);
        assert_eq!(draft.image_url, None);
        // trimming happens in the catalog store
        assert_eq!(draft.title, " Lamp ");
    }

    #[test]
    fn test_form_reports_first_missing_field() {
        let form = ProductForm {
            title: "Lamp".to_string(),
            category: "Furniture".to_string(),
            description: "  ".to_string(),
            price: String::new(),
            image_url: None,
        };
        assert_eq!(
            form.into_draft(),
            Err(ValidationError::required("description"))
        );
    }

    #[test]
    fn test_user_serializes_as_session_record() {
        let user = User {
            id: "u1".to_string(),
            username: "demo".to_string(),
            email: "demo@x.com".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":"u1","username":"demo","email":"demo@x.com"}"#);
    }
}
