//! # State Module
//!
//! Application state for the shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │            ┌────────────────────────────────────────┐                  │
//! │            │               AppState                 │                  │
//! │            └───────────┬─────────────────┬──────────┘                  │
//! │                        ▼                 ▼                              │
//! │              ┌──────────────────┐ ┌──────────────────┐                 │
//! │              │   MarketState    │ │   ConfigState    │                 │
//! │              │  Arc<Mutex<      │ │  currency        │                 │
//! │              │   Marketplace    │ │  usd_to_inr_rate │                 │
//! │              │  >>              │ │  tax_rate_bps    │                 │
//! │              └────────┬─────────┘ └──────────────────┘                 │
//! │                       ▼                                                 │
//! │                  FileStore (session.json)                               │
//! │                                                                         │
//! │  Each command takes only the state it needs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod market;
mod store;

pub use config::{ConfigError, ConfigState, CONFIG_FILE_NAME};
pub use market::{log_restore, MarketState, SessionStore};
pub use store::{FileStore, STORE_FILE_NAME};

/// Everything the dispatcher hands to commands.
#[derive(Clone)]
pub struct AppState {
    pub market: MarketState,
    pub config: ConfigState,
}

impl AppState {
    pub fn new(market: MarketState, config: ConfigState) -> Self {
        AppState { market, config }
    }
}
