//! # Marketplace
//!
//! Wires the stores together and gates every operation on the session.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Marketplace                                    │
//! │                                                                         │
//! │   SessionManager ─── gates ───┬──────────────┬──────────────┐          │
//! │                               ▼              ▼              ▼          │
//! │   add_product ──────► CatalogStore ──► CatalogQuery ──► results        │
//! │                               │                                         │
//! │   add_to_cart ◄───── selection┘                                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │      Cart ──── checkout ────► OrderHistory ──► group_by_month          │
//! │                                                                         │
//! │   Navigator follows each successful operation                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each operation either applies fully or returns an error with nothing
//! changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartTotals};
use crate::catalog::{CatalogStore, ListingSummary};
use crate::currency::{Currency, CurrencyFormatter};
use crate::error::{CoreError, CoreResult};
use crate::lifecycle::{journey_for, ProductJourney};
use crate::money::Money;
use crate::navigation::{Navigator, Screen};
use crate::orders::{GroupingBasis, MonthGroup, OrderHistory, PurchaseSummary};
use crate::query::CatalogQuery;
use crate::session::{KeyValueStore, RestoreOutcome, SessionManager, SessionState};
use crate::types::{Product, ProductDraft, ProductForm, TaxRate, User};
use crate::validation::validate_search_query;

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutReceipt {
    pub totals: CartTotals,
    /// Purchase records appended to the history.
    pub items_recorded: usize,
    #[ts(as = "String")]
    pub purchased_at: DateTime<Utc>,
}

/// All marketplace state for one user session.
pub struct Marketplace<S: KeyValueStore> {
    catalog: CatalogStore,
    cart: Cart,
    history: OrderHistory,
    session: SessionManager<S>,
    navigator: Navigator,
    formatter: CurrencyFormatter,
}

impl<S: KeyValueStore> Marketplace<S> {
    /// Builds a marketplace around an already restored session.
    pub fn new(session: SessionManager<S>, catalog: CatalogStore) -> Self {
        let navigator = Navigator::new(session.is_authenticated());
        Marketplace {
            catalog,
            cart: Cart::new(),
            history: OrderHistory::new(),
            session,
            navigator,
            formatter: CurrencyFormatter::default(),
        }
    }

    /// Sets the checkout tax rate. Starts a fresh cart.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.cart = Cart::with_tax_rate(tax_rate);
        self
    }

    pub fn with_formatter(mut self, formatter: CurrencyFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Re-reads the persisted session and resets navigation to match.
    pub fn restore(&mut self) -> CoreResult<RestoreOutcome> {
        let outcome = self.session.restore()?;
        self.navigator = Navigator::new(outcome.user().is_some());
        Ok(outcome)
    }

    pub fn login(&mut self, email: &str, password: &str) -> CoreResult<User> {
        let user = self.session.login(email, password)?;
        self.navigator.signed_in();
        Ok(user)
    }

    pub fn register(&mut self, username: &str, email: &str, password: &str) -> CoreResult<User> {
        let user = self.session.register(username, email, password)?;
        self.navigator.signed_in();
        Ok(user)
    }

    /// Signs out, empties the cart and returns to the login screen.
    pub fn logout(&mut self) -> CoreResult<()> {
        self.session.logout()?;
        self.cart.clear();
        self.navigator.signed_out();
        Ok(())
    }

    pub fn update_profile(&mut self, username: &str, email: &str) -> CoreResult<User> {
        self.session.update_profile(username, email)
    }

    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    fn user_id(&self) -> CoreResult<String> {
        Ok(self.session.require_user()?.id.clone())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn navigate(&mut self, screen: Screen) -> Screen {
        let authenticated = self.session.is_authenticated();
        self.navigator.navigate(screen, authenticated)
    }

    /// Opens the detail screen for a listing.
    pub fn open_product(&mut self, product_id: &str) -> CoreResult<&Product> {
        self.session.require_user()?;
        if !self.catalog.contains(product_id) {
            return Err(CoreError::ProductNotFound(product_id.to_string()));
        }
        self.navigator.open_product(product_id, true);
        self.product(product_id)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn show_navigation(&self) -> bool {
        self.navigator.show_navigation(self.session.is_authenticated())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Runs a home-screen query over the whole catalog.
    pub fn query_products(&self, query: &CatalogQuery) -> CoreResult<Vec<&Product>> {
        self.session.require_user()?;
        let query = CatalogQuery {
            search_text: validate_search_query(&query.search_text)?,
            ..query.clone()
        };
        Ok(query.apply(self.catalog.list_all()))
    }

    /// Lists a product for the signed-in user and shows My Listings.
    pub fn add_product(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        let owner = self.user_id()?;
        let product = self.catalog.add_product(draft, &owner)?;
        self.navigator.product_listed();
        Ok(product)
    }

    /// Same as [`Marketplace::add_product`] from raw form values.
    pub fn add_product_form(&mut self, form: ProductForm) -> CoreResult<Product> {
        self.session.require_user()?;
        self.add_product(form.into_draft()?)
    }

    pub fn delete_product(&mut self, product_id: &str) -> CoreResult<Product> {
        let requester = self.user_id()?;
        let removed = self.catalog.delete_product(product_id, &requester)?;
        self.navigator.forget_product(product_id);
        Ok(removed)
    }

    pub fn my_listings(&self) -> CoreResult<Vec<&Product>> {
        let user = self.session.require_user()?;
        Ok(self.catalog.list_by_owner(&user.id))
    }

    pub fn listing_summary(&self) -> CoreResult<ListingSummary> {
        Ok(ListingSummary::from_products(self.my_listings()?))
    }

    pub fn product(&self, product_id: &str) -> CoreResult<&Product> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    /// Whether the signed-in user listed `product_id`.
    pub fn is_own_product(&self, product_id: &str) -> CoreResult<bool> {
        let user = self.session.require_user()?;
        Ok(self.product(product_id)?.is_owned_by(&user.id))
    }

    /// Lifecycle journey of a listing for the QR tracker.
    pub fn product_journey(&self, product_id: &str) -> CoreResult<ProductJourney> {
        self.session.require_user()?;
        Ok(journey_for(self.product(product_id)?))
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a listing to the cart.
    ///
    /// ## Errors
    /// - `NotAuthenticated` when nobody is signed in
    /// - `ProductNotFound` when the listing is gone
    /// - `OwnListing` when the user is the seller
    pub fn add_to_cart(&mut self, product_id: &str) -> CoreResult<u32> {
        let user = self.session.require_user()?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if product.is_owned_by(&user.id) {
            return Err(CoreError::OwnListing(product_id.to_string()));
        }

        self.cart.add_to_cart(product)
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> CoreResult<bool> {
        self.session.require_user()?;
        Ok(self.cart.remove_from_cart(product_id))
    }

    /// The cart with entries for deleted listings dropped.
    pub fn cart(&mut self) -> CoreResult<&Cart> {
        self.session.require_user()?;
        self.cart.prune_stale(&self.catalog);
        Ok(&self.cart)
    }

    /// Distinct listed products in the cart (the navigation badge).
    pub fn cart_count(&self) -> usize {
        self.cart
            .entries()
            .iter()
            .filter(|e| self.catalog.contains(&e.product.id))
            .count()
    }

    /// Buys everything in the cart and shows Purchases.
    pub fn checkout(&mut self) -> CoreResult<CheckoutReceipt> {
        self.checkout_at(Utc::now())
    }

    /// Same as [`Marketplace::checkout`] with an explicit purchase time.
    pub fn checkout_at(&mut self, purchased_at: DateTime<Utc>) -> CoreResult<CheckoutReceipt> {
        self.session.require_user()?;
        self.cart.prune_stale(&self.catalog);

        let before = self.history.len();
        let totals = self.cart.checkout_at(&mut self.history, purchased_at)?;
        self.navigator.checked_out();

        Ok(CheckoutReceipt {
            totals,
            items_recorded: self.history.len() - before,
            purchased_at,
        })
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    pub fn purchases(&self, basis: GroupingBasis) -> CoreResult<Vec<MonthGroup>> {
        self.session.require_user()?;
        Ok(self.history.group_by_month(basis))
    }

    pub fn purchase_summary(&self) -> CoreResult<PurchaseSummary> {
        self.session.require_user()?;
        Ok(self.history.summary())
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    // =========================================================================
    // Display
    // =========================================================================

    pub fn format_price(&self, amount: Money) -> String {
        self.formatter.format(amount)
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.formatter = self.formatter.with_currency(currency);
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        self.formatter
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
