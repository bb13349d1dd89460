//! # Catalog Store
//!
//! Holds every listing across all sellers.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Store Operations                             │
//! │                                                                         │
//! │  Add Product form ──────► add_product() ──────► products.insert(0, p)  │
//! │                                                  (newest first)         │
//! │                                                                         │
//! │  My Listings delete ────► delete_product() ───► owner? remove          │
//! │                                                  else Unauthorized      │
//! │                                                                         │
//! │  Home screen ───────────► list_all() ─────────► (read only)            │
//! │  My Listings ───────────► list_by_owner() ────► (read only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductDraft};
use crate::validation::validate_product_draft;

/// In-memory list of listings, natural order = most recently added first.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `products` in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        CatalogStore { products }
    }

    /// Lists a new product owned by `owner_id`, timestamped now.
    ///
    /// ## Behavior
    /// - Title and description are trimmed
    /// - A non-positive price rejects the listing
    /// - The listing is prepended so it shows first
    ///
    /// ## Returns
    /// The stored listing with its new id.
    pub fn add_product(&mut self, draft: ProductDraft, owner_id: &str) -> CoreResult<Product> {
        self.add_product_at(draft, owner_id, Utc::now())
    }

    /// Same as [`CatalogStore::add_product`] with an explicit creation time.
    pub fn add_product_at(
        &mut self,
        draft: ProductDraft,
        owner_id: &str,
        created_at: DateTime<Utc>,
    ) -> CoreResult<Product> {
        let draft = validate_product_draft(draft)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            category: draft.category,
            description: draft.description,
            price: draft.price,
            seller_id: owner_id.to_string(),
            image_url: draft.image_url,
            created_at,
        };

        self.products.insert(0, product.clone());
        Ok(product)
    }

    /// Deletes a listing on behalf of `requester_id`.
    ///
    /// ## Errors
    /// - `ProductNotFound` if no listing has this id
    /// - `Unauthorized` if the requester is not the seller; the catalog
    ///   is left untouched
    pub fn delete_product(&mut self, id: &str, requester_id: &str) -> CoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        if !self.products[index].is_owned_by(requester_id) {
            return Err(CoreError::Unauthorized {
                product_id: id.to_string(),
                requester_id: requester_id.to_string(),
            });
        }

        Ok(self.products.remove(index))
    }

    /// All listings in natural order.
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Listings owned by `owner_id`, preserving natural order.
    pub fn list_by_owner(&self, owner_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_owned_by(owner_id))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Listing Summary
// =============================================================================

/// Figures shown under "My Listings".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListingSummary {
    pub count: usize,
    pub total_value: Money,
    pub highest_price: Money,
    /// Truncated to whole cents.
    pub average_price: Money,
    pub category_count: usize,
}

impl ListingSummary {
    pub fn from_products<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut summary = ListingSummary::default();
        let mut categories = BTreeSet::new();

        for product in products {
            summary.count += 1;
            summary.total_value += product.price;
            summary.highest_price = summary.highest_price.max(product.price);
            categories.insert(product.category);
        }

        if summary.count > 0 {
            summary.average_price =
                Money::from_cents(summary.total_value.cents() / summary.count as i64);
        }
        summary.category_count = categories.len();
        summary
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::Category;
    use chrono::TimeZone;

    fn draft(title: &str, cents: i64) -> ProductDraft {
        ProductDraft {
            title: title.to_string(),
            category: Category::Other,
            description: format!("{} description", title),
            price: Money::from_cents(cents),
            image_url: None,
        }
    }

    fn catalog_with(entries: &[(&str, &str, i64)]) -> CatalogStore {
        let mut catalog = CatalogStore::new();
        for (title, owner, cents) in entries {
            catalog.add_product(draft(title, *cents), owner).unwrap();
        }
        catalog
    }

    #[test]
    fn test_add_product_prepends_and_assigns_identity() {
        let mut catalog = CatalogStore::new();
        let first = catalog.add_product(draft("Lamp", 3000), "user1").unwrap();
        let second = catalog.add_product(draft("Chair", 4000), "user1").unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(catalog.list_all()[0].id, second.id);
        assert_eq!(catalog.list_all()[1].id, first.id);
        assert_eq!(second.seller_id, "user1");
    }

    #[test]
    fn test_add_product_trims_fields() {
        let mut catalog = CatalogStore::new();
        let mut input = draft("  Lamp  ", 3000);
        input.description = "  bright \n".to_string();

        let product = catalog.add_product(input, "user1").unwrap();
        assert_eq!(product.title, "Lamp");
        assert_eq!(product.description, "bright");
    }

    #[test]
    fn test_add_product_uses_given_timestamp() {
        let mut catalog = CatalogStore::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let product = catalog.add_product_at(draft("Lamp", 3000), "user1", at).unwrap();
        assert_eq!(product.created_at, at);
    }

    #[test]
    fn test_add_product_rejects_non_positive_price() {
        let mut catalog = CatalogStore::new();
        let err = catalog.add_product(draft("Free stuff", 0), "user1").unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_delete_product_by_owner() {
        let mut catalog = catalog_with(&[("Lamp", "user1", 3000)]);
        let id = catalog.list_all()[0].id.clone();

        let removed = catalog.delete_product(&id, "user1").unwrap();
        assert_eq!(removed.title, "Lamp");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_delete_product_by_stranger_is_unauthorized() {
        let mut catalog = catalog_with(&[("Lamp", "user1", 3000)]);
        let id = catalog.list_all()[0].id.clone();

        let err = catalog.delete_product(&id, "user2").unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_delete_missing_product() {
        let mut catalog = CatalogStore::new();
        assert!(matches!(
            catalog.delete_product("nope", "user1"),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_list_by_owner_is_ordered_subset() {
        let catalog = catalog_with(&[
            ("A", "user1", 100),
            ("B", "user2", 200),
            ("C", "user1", 300),
            ("D", "user3", 400),
        ]);

        let mine: Vec<&str> = catalog
            .list_by_owner("user1")
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        let expected: Vec<&str> = catalog
            .list_all()
            .iter()
            .filter(|p| p.seller_id == "user1")
            .map(|p| p.title.as_str())
            .collect();

        assert_eq!(mine, expected);
        assert_eq!(mine, vec!["C", "A"]);
        assert!(catalog.list_by_owner("nobody").is_empty());
    }

    #[test]
    fn test_listing_summary() {
        let catalog = catalog_with(&[("A", "u", 4500), ("B", "u", 12000), ("C", "u", 1000)]);
        let summary = ListingSummary::from_products(catalog.list_all());

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_value.cents(), 17500);
        assert_eq!(summary.highest_price.cents(), 12000);
        assert_eq!(summary.average_price.cents(), 5833);
        assert_eq!(summary.category_count, 1);
    }

    #[test]
    fn test_listing_summary_empty() {
        let summary = ListingSummary::from_products(std::iter::empty());
        assert_eq!(summary, ListingSummary::default());
    }
}
