//! # ecofinds-core: Pure Marketplace Logic for EcoFinds
//!
//! This crate is the **heart** of EcoFinds, a second-hand marketplace demo.
//! It contains all catalog, cart, purchase-history and session logic as
//! plain owned state objects with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EcoFinds Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (screens)                           │   │
//! │  │   Login ─► Home ─► Product Detail ─► Cart ─► Purchases          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON lines                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ecofinds-shell commands                      │   │
//! │  │    login, query_products, add_to_cart, checkout, etc.           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ecofinds-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌─────────┐ ┌──────────┐   │   │
//! │  │  │ catalog │ │  query  │ │  cart  │ │ orders  │ │ session  │   │   │
//! │  │  └─────────┘ └─────────┘ └────────┘ └─────────┘ └──────────┘   │   │
//! │  │          marketplace (gates everything on the session)         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, Category, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`currency`] - Display formatting in USD or INR
//! - [`catalog`] - Catalog store (add, delete with ownership, list)
//! - [`query`] - Search, category, price-bucket and sort pipeline
//! - [`cart`] - Cart store and totals
//! - [`orders`] - Append-only purchase history and month grouping
//! - [`lifecycle`] - Product journey and carbon saved by resale
//! - [`session`] - Mock session manager and the key-value seam
//! - [`navigation`] - Screen state machine
//! - [`marketplace`] - Aggregate that wires the stores together
//! - [`seed`] - Demo listings
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use ecofinds_core::money::Money;
//! use ecofinds_core::types::TaxRate;
//!
//! let subtotal = Money::from_cents(16500); // $165.00
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
//! assert_eq!(tax.cents(), 1320); // $13.20
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod lifecycle;
pub mod marketplace;
pub mod money;
pub mod navigation;
pub mod orders;
pub mod query;
pub mod seed;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, CartTotals};
pub use catalog::{CatalogStore, ListingSummary};
pub use currency::{Currency, CurrencyFormatter, UsdToInrRate};
pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use lifecycle::{ImpactSummary, LifecycleStage, ProductJourney, StageKind};
pub use marketplace::{CheckoutReceipt, Marketplace};
pub use money::Money;
pub use navigation::{Navigator, Screen};
pub use orders::{GroupingBasis, MonthGroup, OrderHistory, PurchaseRecord, PurchaseSummary};
pub use query::{CatalogQuery, CategoryFilter, PriceBucket, SortOrder};
pub use session::{
    CredentialVerifier, KeyValueStore, MemoryStore, MockVerifier, RestoreOutcome, SessionManager,
    SessionState,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key under which the active identity is persisted.
pub const SESSION_KEY: &str = "ecofinds-user";

/// Checkout tax rate in basis points (800 = 8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Maximum number of distinct products in one cart.
///
/// ## Business Reason
/// Keeps the cart screen usable and bounds checkout work.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in one cart line.
///
/// ## Business Reason
/// Second-hand listings are one-offs; a runaway add loop should stop early.
pub const MAX_ITEM_QUANTITY: u32 = 999;
