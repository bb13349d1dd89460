//! # Market State
//!
//! The shared [`Marketplace`] every command works on.
//!
//! ## Thread Safety
//! The marketplace is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every command may read or modify it
//! 2. Only one command should modify it at a time
//! 3. The stores inside must change together (cart and history at checkout)
//!
//! A panic while the lock is held poisons the mutex; the state is still
//! consistent because every marketplace operation validates before it
//! mutates, so the guard is recovered instead of propagating the panic.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use ecofinds_core::seed::demo_catalog;
use ecofinds_core::{
    CatalogStore, CoreResult, KeyValueStore, Marketplace, RestoreOutcome, SessionManager,
};

use super::ConfigState;

/// Session store type held by the shell.
pub type SessionStore = Box<dyn KeyValueStore + Send>;

#[derive(Clone)]
pub struct MarketState {
    market: Arc<Mutex<Marketplace<SessionStore>>>,
}

impl MarketState {
    pub fn new(market: Marketplace<SessionStore>) -> Self {
        MarketState {
            market: Arc::new(Mutex::new(market)),
        }
    }

    /// Builds the marketplace described by `config`, restoring the session
    /// persisted in `store`.
    pub fn open(config: &ConfigState, store: SessionStore) -> CoreResult<Self> {
        let catalog = if config.seed_catalog {
            demo_catalog()
        } else {
            CatalogStore::new()
        };

        let mut market = Marketplace::new(SessionManager::new(store), catalog)
            .with_tax_rate(config.tax_rate())
            .with_formatter(config.formatter());
        log_restore(&market.restore()?);

        Ok(Self::new(market))
    }

    /// Executes a function with read access to the marketplace.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let user = market_state.with_market(|m| m.current_user().cloned());
    /// ```
    pub fn with_market<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Marketplace<SessionStore>) -> R,
    {
        let market = self.market.lock().unwrap_or_else(PoisonError::into_inner);
        f(&market)
    }

    /// Executes a function with write access to the marketplace.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// market_state.with_market_mut(|m| m.add_to_cart("3"))?;
    /// ```
    pub fn with_market_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Marketplace<SessionStore>) -> R,
    {
        let mut market = self.market.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut market)
    }
}

/// Logs what a session restore found.
pub fn log_restore(outcome: &RestoreOutcome) {
    match outcome {
        RestoreOutcome::Anonymous => {}
        RestoreOutcome::Restored(user) => info!(user_id = %user.id, "Session restored"),
        RestoreOutcome::Discarded { reason } => {
            warn!(reason = %reason, "Discarded unreadable session record")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecofinds_core::{Currency, MemoryStore, Screen, SESSION_KEY};

    #[test]
    fn test_open_applies_config() {
        let config = ConfigState {
            currency: Currency::Inr,
            tax_rate_bps: 0,
            seed_catalog: false,
            ..ConfigState::default()
        };
        let state = MarketState::open(&config, Box::new(MemoryStore::new())).unwrap();

        state.with_market(|m| {
            assert!(m.catalog().is_empty());
            assert_eq!(m.formatter().currency, Currency::Inr);
            assert!(m.current_user().is_none());
        });
    }

    #[test]
    fn test_open_survives_corrupt_session() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "{not json").unwrap();

        let state = MarketState::open(&ConfigState::default(), Box::new(store)).unwrap();
        state.with_market(|m| {
            assert!(m.current_user().is_none());
            assert_eq!(m.navigator().current(), Screen::Login);
        });
    }

    #[test]
    fn test_seeded_by_default() {
        let state =
            MarketState::open(&ConfigState::default(), Box::new(MemoryStore::new())).unwrap();
        assert_eq!(state.with_market(|m| m.catalog().len()), 10);
    }

    #[test]
    fn test_clones_share_state() {
        let state =
            MarketState::open(&ConfigState::default(), Box::new(MemoryStore::new())).unwrap();
        let other = state.clone();

        other
            .with_market_mut(|m| m.login("demo@ecofinds.com", "pw"))
            .unwrap();
        assert!(state.with_market(|m| m.current_user().is_some()));
    }
}
