//! # Config Commands
//!
//! Configuration retrieval and the currency toggle.

use serde::Serialize;
use tracing::{debug, info};

use ecofinds_core::{Currency, Money};

use crate::state::{ConfigState, MarketState};

/// Startup configuration plus the currency currently shown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(flatten)]
    pub config: ConfigState,
    pub active_currency: Currency,
    pub currency_symbol: &'static str,
}

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (to configure UI)
/// - Currency formatting
pub fn get_config(config: &ConfigState, market: &MarketState) -> ConfigResponse {
    debug!("get_config command");
    let active_currency = market.with_market(|m| m.formatter().currency);
    ConfigResponse {
        config: config.clone(),
        active_currency,
        currency_symbol: active_currency.symbol(),
    }
}

/// Formats a USD amount in the selected currency.
pub fn format_price(market: &MarketState, cents: i64) -> String {
    market.with_market(|m| m.format_price(Money::from_cents(cents)))
}

/// Switches the display currency. Prices stay stored in USD.
pub fn set_currency(market: &MarketState, currency: Currency) -> Currency {
    debug!(currency = %currency, "set_currency command");
    market.with_market_mut(|m| m.set_currency(currency));
    info!(currency = %currency, "Display currency changed");
    currency
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecofinds_core::MemoryStore;

    #[test]
    fn test_currency_toggle() {
        let config = ConfigState::default();
        let market = MarketState::open(&config, Box::new(MemoryStore::new())).unwrap();

        assert_eq!(format_price(&market, 4500), "$45.00");
        set_currency(&market, Currency::Inr);
        assert_eq!(format_price(&market, 4500), "₹3,740");

        let response = get_config(&config, &market);
        assert_eq!(response.active_currency, Currency::Inr);
        assert_eq!(response.currency_symbol, "₹");
        // Startup config is left alone
        assert_eq!(response.config.currency, Currency::Usd);
    }

    #[test]
    fn test_config_json_shape() {
        let config = ConfigState::default();
        let market = MarketState::open(&config, Box::new(MemoryStore::new())).unwrap();

        let json = serde_json::to_value(get_config(&config, &market)).unwrap();
        assert_eq!(json["tax_rate_bps"], 800);
        assert_eq!(json["activeCurrency"], "USD");
    }
}
