//! # Product Commands
//!
//! Browse, list and delete products.
//!
//! ## Home Screen Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ search: "jacket"  ] [ Category: All ▾ ] [ Price: all ▾ ] [ Newest ▾ ]│
//! │                                                                         │
//! │  2 results found                                                        │
//! │  ┌──────────────┐ ┌──────────────┐                                      │
//! │  │ Denim Jacket │ │ Rain Jacket  │                                      │
//! │  │ $45.00       │ │ $30.00       │                                      │
//! │  └──────────────┘ └──────────────┘                                      │
//! │                                                                         │
//! │  {"cmd":"query_products","args":{"query":{"searchText":"jacket"}}}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use ecofinds_core::{CatalogQuery, CurrencyFormatter, ListingSummary, Product, ProductForm};

use crate::error::ApiError;
use crate::state::MarketState;

/// A listing plus its price formatted in the selected currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    pub formatted_price: String,
}

impl ProductDto {
    pub fn new(product: &Product, formatter: &CurrencyFormatter) -> Self {
        ProductDto {
            formatted_price: formatter.format(product.price),
            product: product.clone(),
        }
    }
}

/// Query results for the home screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub products: Vec<ProductDto>,
    pub result_count: usize,
    /// Show "N results found" instead of the default header.
    pub narrowed: bool,
}

/// My Listings screen: the user's products and their summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsResponse {
    pub products: Vec<ProductDto>,
    pub summary: ListingSummary,
    pub formatted_total_value: String,
}

/// Filters and sorts the whole catalog.
///
/// ## Arguments
/// * `query` - search text, category, price bucket and sort order
pub fn query_products(
    market: &MarketState,
    query: &CatalogQuery,
) -> Result<QueryResponse, ApiError> {
    debug!(
        search = %query.search_text,
        category = %query.category,
        bucket = ?query.price_bucket,
        sort = ?query.sort_order,
        "query_products command"
    );

    market.with_market(|m| -> Result<QueryResponse, ApiError> {
        let formatter = m.formatter();
        let products: Vec<ProductDto> = m
            .query_products(query)?
            .into_iter()
            .map(|p| ProductDto::new(p, &formatter))
            .collect();

        Ok(QueryResponse {
            result_count: products.len(),
            narrowed: query.is_narrowed(),
            products,
        })
    })
}

/// Lists a new product from the Add Product form.
///
/// ## User Workflow
/// ```text
/// Add Product form ──► add_product() ← THIS FUNCTION
///                           │
///                           ├── blank field / bad price → VALIDATION_ERROR
///                           │
///                           └── OK → prepended to catalog, screen = my-listings
/// ```
pub fn add_product(market: &MarketState, form: ProductForm) -> Result<ProductDto, ApiError> {
    debug!(
        title = %form.title,
        category = %form.category,
        price = %form.price,
        "add_product command"
    );

    market.with_market_mut(|m| -> Result<ProductDto, ApiError> {
        let product = m.add_product_form(form)?;
        info!(product_id = %product.id, title = %product.title, "Product listed");
        Ok(ProductDto::new(&product, &m.formatter()))
    })
}

/// Deletes one of the user's own listings.
pub fn delete_product(market: &MarketState, product_id: &str) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "delete_product command");

    market.with_market_mut(|m| -> Result<ProductDto, ApiError> {
        let removed = m.delete_product(product_id)?;
        info!(product_id = %removed.id, "Product deleted");
        Ok(ProductDto::new(&removed, &m.formatter()))
    })
}

pub fn my_listings(market: &MarketState) -> Result<ListingsResponse, ApiError> {
    debug!("my_listings command");

    market.with_market(|m| -> Result<ListingsResponse, ApiError> {
        let formatter = m.formatter();
        let listings = m.my_listings()?;
        let summary = ListingSummary::from_products(listings.iter().copied());

        Ok(ListingsResponse {
            products: listings
                .into_iter()
                .map(|p| ProductDto::new(p, &formatter))
                .collect(),
            formatted_total_value: formatter.format(summary.total_value),
            summary,
        })
    })
}
