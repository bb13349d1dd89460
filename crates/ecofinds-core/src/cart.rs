//! # Cart Store
//!
//! The signed-in user's pending selections before checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Operation               Cart State Change     │
//! │  ─────────────            ─────────               ─────────────────     │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_to_cart() ───────► qty += 1 or push     │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► entries.remove(i)    │
//! │                                                                         │
//! │  "Checkout" ─────────────► checkout() ──────────► history += units,    │
//! │                                                    entries.clear()      │
//! │                                                                         │
//! │  Cart screen ────────────► totals() ────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogStore;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::orders::OrderHistory;
use crate::types::{Product, TaxRate};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// One line of the cart.
///
/// The product is a snapshot taken when it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one entry per product id (adding again increments quantity)
/// - Every entry has 1 <= quantity <= [`MAX_ITEM_QUANTITY`]
/// - At most [`MAX_CART_ITEMS`] entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
    tax_rate: TaxRate,
}

impl Cart {
    /// Creates an empty cart taxed at the default 8%.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cart with a custom tax rate.
    pub fn with_tax_rate(tax_rate: TaxRate) -> Self {
        Cart {
            entries: Vec::new(),
            tax_rate,
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity goes up by one
    /// - Otherwise: new entry with quantity 1, appended at the end
    ///
    /// ## Returns
    /// The entry's quantity after the add.
    ///
    /// ## Errors
    /// - `QuantityLimit` when the entry is already at [`MAX_ITEM_QUANTITY`]
    /// - `CartFull` when a new entry would pass [`MAX_CART_ITEMS`]
    ///
    /// The cart is unchanged on error.
    pub fn add_to_cart(&mut self, product: &Product) -> CoreResult<u32> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            if entry.quantity >= MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityLimit {
                    product_id: product.id.clone(),
                    max: MAX_ITEM_QUANTITY,
                });
            }
            entry.quantity += 1;
            return Ok(entry.quantity);
        }

        if self.entries.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartFull {
                max: MAX_CART_ITEMS,
            });
        }

        self.entries.push(CartEntry {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        });
        Ok(1)
    }

    /// Removes the entry for `product_id`. Missing ids are a no-op.
    ///
    /// ## Returns
    /// Whether an entry was removed.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() != initial_len
    }

    /// Drops entries whose product is no longer listed.
    ///
    /// ## Returns
    /// Ids of the dropped products.
    pub fn prune_stale(&mut self, catalog: &CatalogStore) -> Vec<String> {
        let mut dropped = Vec::new();
        self.entries.retain(|e| {
            let listed = catalog.contains(&e.product.id);
            if !listed {
                dropped.push(e.product.id.clone());
            }
            listed
        });
        dropped
    }

    /// Moves the cart into `history`, one record per unit, then empties it.
    ///
    /// ## Errors
    /// `EmptyCart` when there is nothing to buy; neither cart nor history
    /// changes in that case.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Lamp ×3, Chair ×1
    ///      │
    ///      ▼
    /// checkout() ← THIS FUNCTION
    ///      │
    ///      ├── history += [Lamp, Lamp, Lamp, Chair]
    ///      └── cart = []
    /// ```
    pub fn checkout(&mut self, history: &mut OrderHistory) -> CoreResult<CartTotals> {
        self.checkout_at(history, Utc::now())
    }

    /// Same as [`Cart::checkout`] with an explicit purchase time.
    pub fn checkout_at(
        &mut self,
        history: &mut OrderHistory,
        purchased_at: DateTime<Utc>,
    ) -> CoreResult<CartTotals> {
        if self.entries.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = self.totals();
        let units: Vec<Product> = self
            .entries
            .iter()
            .flat_map(|e| std::iter::repeat(&e.product).take(e.quantity as usize))
            .cloned()
            .collect();

        history.record_purchases_at(units, purchased_at);
        self.entries.clear();
        Ok(totals)
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Number of distinct products (the navigation badge).
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of units across entries.
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Sum of price × quantity.
    pub fn subtotal(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Subtotal × tax rate.
    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(self.tax_rate)
    }

    /// Subtotal + tax.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cart totals summary for the order-summary panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub entry_count: usize,
    pub total_quantity: u32,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let tax = subtotal.calculate_tax(cart.tax_rate);
        CartTotals {
            entry_count: cart.entry_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
