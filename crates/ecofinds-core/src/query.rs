//! # Catalog Query
//!
//! Turns the full catalog plus the home-screen controls into the ordered
//! list of cards to show.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Query Pipeline                           │
//! │                                                                         │
//! │  catalog ──► text match ──► category ──► price bucket ──► stable sort  │
//! │             (title OR       (exact or     (<50, 50..=200,   (date or    │
//! │              description)    "All")        >200 USD)         price)     │
//! │                                                                         │
//! │  The three filters are independent predicates, so their order never    │
//! │  changes the result. Sorting is stable: ties keep input order.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product};

/// Lower edge of the middle price bucket, inclusive.
const BUCKET_LOW: Money = Money::from_dollars(50);

/// Upper edge of the middle price bucket, inclusive.
const BUCKET_HIGH: Money = Money::from_dollars(200);

// =============================================================================
// Category Filter
// =============================================================================

/// Category chip selection. Serialized as `"All"` or the category label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Sentinel label that matches every category.
    pub const ALL_LABEL: &'static str = "All";

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim() == Self::ALL_LABEL {
            Ok(CategoryFilter::All)
        } else {
            value.parse().map(CategoryFilter::Only)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(category) => f.write_str(category.label()),
        }
    }
}

// =============================================================================
// Price Bucket
// =============================================================================

/// Price range filter, always evaluated in USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceBucket {
    #[default]
    #[serde(rename = "all")]
    All,
    /// price < $50
    #[serde(rename = "under-50")]
    Under50,
    /// $50 <= price <= $200
    #[serde(rename = "50-200")]
    From50To200,
    /// price > $200
    #[serde(rename = "over-200")]
    Over200,
}

impl PriceBucket {
    /// The three non-overlapping buckets.
    pub const PARTITION: [PriceBucket; 3] = [
        PriceBucket::Under50,
        PriceBucket::From50To200,
        PriceBucket::Over200,
    ];

    pub fn matches(&self, price: Money) -> bool {
        match self {
            PriceBucket::All => true,
            PriceBucket::Under50 => price < BUCKET_LOW,
            PriceBucket::From50To200 => price >= BUCKET_LOW && price <= BUCKET_HIGH,
            PriceBucket::Over200 => price > BUCKET_HIGH,
        }
    }

    /// The single partition bucket a price falls into.
    pub fn of(price: Money) -> PriceBucket {
        if price < BUCKET_LOW {
            PriceBucket::Under50
        } else if price <= BUCKET_HIGH {
            PriceBucket::From50To200
        } else {
            PriceBucket::Over200
        }
    }
}

// =============================================================================
// Sort Order
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "newest")]
    NewestFirst,
    #[serde(rename = "oldest")]
    OldestFirst,
    #[serde(rename = "price-low")]
    PriceAscending,
    #[serde(rename = "price-high")]
    PriceDescending,
}

// =============================================================================
// Query
// =============================================================================

/// Home-screen browse controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CatalogQuery {
    pub search_text: String,
    #[ts(type = "string")]
    pub category: CategoryFilter,
    pub price_bucket: PriceBucket,
    pub sort_order: SortOrder,
}

impl CatalogQuery {
    /// Checks one listing against the three filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_text(product)
            && self.category.matches(product.category)
            && self.price_bucket.matches(product.price)
    }

    fn matches_text(&self, product: &Product) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        product.title.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    /// Whether the user narrowed the catalog by text or category.
    ///
    /// The home screen switches its header to "N results found" then.
    pub fn is_narrowed(&self) -> bool {
        !self.search_text.is_empty() || self.category != CategoryFilter::All
    }

    /// Runs the query. Pure: the catalog is not touched.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::query::{CatalogQuery, PriceBucket};
    ///
    /// let query = CatalogQuery {
    ///     price_bucket: PriceBucket::Under50,
    ///     ..CatalogQuery::default()
    /// };
    /// assert!(query.apply(&[]).is_empty());
    /// ```
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();

        // sort_by is stable, so equal keys keep their catalog order
        match self.sort_order {
            SortOrder::NewestFirst => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::OldestFirst => results.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::PriceAscending => results.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDescending => results.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        results
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_product(id: &str, cents: i64, day: u32, category: Category) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Item {}", id),
            category,
            description: format!("Description of {}", id),
            price: Money::from_cents(cents),
            seller_id: "seller".to_string(),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn ids(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_example_scenario() {
        let catalog = vec![
            test_product("A", 4500, 1, Category::Clothing),
            test_product("B", 12000, 2, Category::Furniture),
        ];

        let newest = CatalogQuery::default();
        assert_eq!(ids(&newest.apply(&catalog)), vec!["B", "A"]);

        let cheap = CatalogQuery {
            price_bucket: PriceBucket::Under50,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&cheap.apply(&catalog)), vec!["A"]);
    }

    #[test]
    fn test_text_match_is_case_insensitive_on_title_or_description() {
        let mut jacket = test_product("1", 4500, 1, Category::Clothing);
        jacket.title = "Vintage Denim Jacket".to_string();
        let mut table = test_product("2", 12000, 2, Category::Furniture);
        table.description = "Handcrafted WOODEN table".to_string();

        let catalog = vec![jacket, table];

        let query = CatalogQuery {
            search_text: "denim".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), vec!["1"]);

        let query = CatalogQuery {
            search_text: "Wooden".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), vec!["2"]);

        let query = CatalogQuery {
            search_text: "bicycle".to_string(),
            ..CatalogQuery::default()
        };
        assert!(query.apply(&catalog).is_empty());
    }

    #[test]
    fn test_category_filter() {
        let catalog = vec![
            test_product("1", 100, 1, Category::Books),
            test_product("2", 100, 2, Category::Sports),
        ];

        let query = CatalogQuery {
            category: CategoryFilter::Only(Category::Sports),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), vec!["2"]);
        assert_eq!(CatalogQuery::default().apply(&catalog).len(), 2);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert!(PriceBucket::Under50.matches(Money::from_cents(4999)));
        assert!(!PriceBucket::Under50.matches(Money::from_cents(5000)));
        assert!(PriceBucket::From50To200.matches(Money::from_cents(5000)));
        assert!(PriceBucket::From50To200.matches(Money::from_cents(20000)));
        assert!(!PriceBucket::Over200.matches(Money::from_cents(20000)));
        assert!(PriceBucket::Over200.matches(Money::from_cents(20001)));
    }

    #[test]
    fn test_buckets_partition_prices() {
        for cents in [0, 1, 4999, 5000, 5001, 12000, 19999, 20000, 20001, 59900] {
            let price = Money::from_cents(cents);
            let hits: Vec<PriceBucket> = PriceBucket::PARTITION
                .into_iter()
                .filter(|b| b.matches(price))
                .collect();
            assert_eq!(hits, vec![PriceBucket::of(price)], "price {}", price);
        }
    }

    #[test]
    fn test_sorting_is_stable_on_ties() {
        let catalog = vec![
            test_product("first", 1000, 5, Category::Other),
            test_product("second", 1000, 5, Category::Other),
            test_product("cheap", 500, 1, Category::Other),
        ];

        let by_price = CatalogQuery {
            sort_order: SortOrder::PriceAscending,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&by_price.apply(&catalog)), vec!["cheap", "first", "second"]);

        let newest = CatalogQuery::default();
        assert_eq!(ids(&newest.apply(&catalog)), vec!["first", "second", "cheap"]);

        let oldest = CatalogQuery {
            sort_order: SortOrder::OldestFirst,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&oldest.apply(&catalog)), vec!["cheap", "first", "second"]);
    }

    #[test]
    fn test_price_descending_is_reverse_of_ascending_for_unique_prices() {
        let catalog = vec![
            test_product("a", 300, 1, Category::Other),
            test_product("b", 100, 2, Category::Other),
            test_product("c", 200, 3, Category::Other),
        ];

        let asc = CatalogQuery {
            sort_order: SortOrder::PriceAscending,
            ..CatalogQuery::default()
        };
        let desc = CatalogQuery {
            sort_order: SortOrder::PriceDescending,
            ..CatalogQuery::default()
        };

        let mut reversed = ids(&asc.apply(&catalog));
        reversed.reverse();
        assert_eq!(reversed, ids(&desc.apply(&catalog)));
    }

    #[test]
    fn test_query_deserializes_from_screen_values() {
        let json = r#"{"searchText":"","category":"Home & Garden","priceBucket":"50-200","sortOrder":"price-high"}"#;
        let query: CatalogQuery = serde_json::from_str(json).unwrap();

        assert_eq!(query.category, CategoryFilter::Only(Category::HomeAndGarden));
        assert_eq!(query.price_bucket, PriceBucket::From50To200);
        assert_eq!(query.sort_order, SortOrder::PriceDescending);

        let defaults: CatalogQuery = serde_json::from_str(r#"{"category":"All"}"#).unwrap();
        assert_eq!(defaults, CatalogQuery::default());
        assert!(!defaults.is_narrowed());

        assert!(serde_json::from_str::<CatalogQuery>(r#"{"category":"Toys"}"#).is_err());
    }
}
