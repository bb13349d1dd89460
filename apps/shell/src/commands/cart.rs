//! # Cart Commands
//!
//! Commands for the cart screen and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Purchases│                        │
//! │  │  Cart    │     │          │     │  screen  │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                 ▲                              │
//! │       │           add_to_cart            │                              │
//! │       │           remove_from_cart    checkout                          │
//! │       │                │                 │                              │
//! │       └─── logout ─────┴─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use ecofinds_core::lifecycle::items_saved;
use ecofinds_core::{Cart, CartTotals, CheckoutReceipt, CurrencyFormatter};

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::MarketState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: ProductDto,
    pub quantity: u32,
    pub formatted_line_total: String,
}

/// Totals as the order-summary panel prints them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl FormattedTotals {
    pub fn new(totals: &CartTotals, formatter: &CurrencyFormatter) -> Self {
        FormattedTotals {
            subtotal: formatter.format(totals.subtotal),
            tax: formatter.format(totals.tax),
            total: formatter.format(totals.total),
        }
    }
}

/// Cart response including entries and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub entries: Vec<CartLine>,
    pub totals: CartTotals,
    pub formatted: FormattedTotals,
    /// Tax rate label, e.g. "8%".
    pub tax_label: String,
    /// Products kept from going to waste (the impact panel).
    pub items_saved: usize,
}

impl CartResponse {
    fn new(cart: &Cart, formatter: &CurrencyFormatter) -> Self {
        let totals = cart.totals();
        CartResponse {
            entries: cart
                .entries()
                .iter()
                .map(|e| CartLine {
                    product: ProductDto::new(&e.product, formatter),
                    quantity: e.quantity,
                    formatted_line_total: formatter.format(e.line_total()),
                })
                .collect(),
            formatted: FormattedTotals::new(&totals, formatter),
            tax_label: format!("{}%", cart.tax_rate().percentage()),
            items_saved: items_saved(cart),
            totals,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub receipt: CheckoutReceipt,
    pub formatted: FormattedTotals,
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CART                                              2 items              │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Vintage Denim Jacket      x1                 $45.00                    │
/// │  Wooden Coffee Table       x1                $120.00                    │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                    $165.00                    │
/// │  Tax (8%)                                     $13.20                    │
/// │  TOTAL                                       $178.20                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(market: &MarketState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    market.with_market_mut(|m| -> Result<CartResponse, ApiError> {
        let formatter = m.formatter();
        Ok(CartResponse::new(m.cart()?, &formatter))
    })
}

/// Adds one unit of a listing.
///
/// ## Returns
/// Updated cart with all entries and totals
pub fn add_to_cart(market: &MarketState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");
    market.with_market_mut(|m| -> Result<CartResponse, ApiError> {
        let quantity = m.add_to_cart(product_id)?;
        debug!(product_id = %product_id, quantity, "Cart updated");
        let formatter = m.formatter();
        Ok(CartResponse::new(m.cart()?, &formatter))
    })
}

pub fn remove_from_cart(market: &MarketState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    market.with_market_mut(|m| -> Result<CartResponse, ApiError> {
        m.remove_from_cart(product_id)?;
        let formatter = m.formatter();
        Ok(CartResponse::new(m.cart()?, &formatter))
    })
}

/// Buys everything in the cart.
///
/// ## Errors
/// `CART_ERROR` when the cart is empty.
pub fn checkout(market: &MarketState) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");
    market.with_market_mut(|m| -> Result<CheckoutResponse, ApiError> {
        let receipt = m.checkout()?;
        info!(
            items = receipt.items_recorded,
            total_cents = receipt.totals.total.cents(),
            "Checkout complete"
        );
        Ok(CheckoutResponse {
            formatted: FormattedTotals::new(&receipt.totals, &m.formatter()),
            receipt,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::auth;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use ecofinds_core::MemoryStore;

    fn signed_in() -> MarketState {
        let market =
            MarketState::open(&ConfigState::default(), Box::new(MemoryStore::new())).unwrap();
        auth::login(&market, "demo@ecofinds.com", "pw").unwrap();
        market
    }

    #[test]
    fn test_cart_totals_formatted() {
        let market = signed_in();
        add_to_cart(&market, "1").unwrap();
        let cart = add_to_cart(&market, "2").unwrap();

        assert_eq!(cart.entries.len(), 2);
        assert_eq!(cart.formatted.subtotal, "$165.00");
        assert_eq!(cart.formatted.tax, "$13.20");
        assert_eq!(cart.formatted.total, "$178.20");
        assert_eq!(cart.tax_label, "8%");
        assert_eq!(cart.items_saved, 2);
    }

    #[test]
    fn test_quantity_limit_is_cart_error() {
        let market = signed_in();
        for _ in 0..ecofinds_core::MAX_ITEM_QUANTITY {
            add_to_cart(&market, "5").unwrap();
        }

        let err = add_to_cart(&market, "5").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let cart = get_cart(&market).unwrap();
        assert_eq!(cart.entries[0].quantity, 999);
        assert_eq!(cart.items_saved, 1);
    }

    #[test]
    fn test_repeat_add_increments() {
        let market = signed_in();
        add_to_cart(&market, "5").unwrap();
        let cart = add_to_cart(&market, "5").unwrap();

        assert_eq!(cart.entries.len(), 1);
        assert_eq!(cart.entries[0].quantity, 2);
        assert_eq!(cart.entries[0].formatted_line_total, "$50.00");
    }

    #[test]
    fn test_remove_and_empty_checkout() {
        let market = signed_in();
        add_to_cart(&market, "5").unwrap();
        let cart = remove_from_cart(&market, "5").unwrap();
        assert!(cart.entries.is_empty());

        let err = checkout(&market).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_checkout_empties_cart() {
        let market = signed_in();
        add_to_cart(&market, "1").unwrap();
        add_to_cart(&market, "1").unwrap();

        let response = checkout(&market).unwrap();
        assert_eq!(response.receipt.items_recorded, 2);
        assert_eq!(response.formatted.total, "$97.20");
        assert!(get_cart(&market).unwrap().entries.is_empty());
    }

    #[test]
    fn test_add_unknown_product() {
        let market = signed_in();
        assert_eq!(add_to_cart(&market, "nope").unwrap_err().code, ErrorCode::NotFound);
    }
}
