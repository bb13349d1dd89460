//! # Purchase Commands
//!
//! The Purchases screen: history grouped by month, newest month first.

use serde::Serialize;
use tracing::debug;

use ecofinds_core::{GroupingBasis, PurchaseSummary};

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::MarketState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSection {
    /// e.g. "February 2024"
    pub label: String,
    pub purchases: Vec<ProductDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasesResponse {
    pub groups: Vec<MonthSection>,
    pub summary: PurchaseSummary,
    pub formatted_total_spent: String,
}

/// Gets the purchase history.
///
/// ## Arguments
/// * `basis` - listing date (default) or purchase date decides the month
pub fn purchases(market: &MarketState, basis: GroupingBasis) -> Result<PurchasesResponse, ApiError> {
    debug!(basis = ?basis, "purchases command");

    market.with_market(|m| -> Result<PurchasesResponse, ApiError> {
        let formatter = m.formatter();
        let summary = m.purchase_summary()?;
        let groups = m
            .purchases(basis)?
            .into_iter()
            .map(|group| MonthSection {
                label: group.label,
                purchases: group
                    .purchases
                    .iter()
                    .map(|record| ProductDto::new(&record.product, &formatter))
                    .collect(),
            })
            .collect();

        Ok(PurchasesResponse {
            groups,
            formatted_total_spent: formatter.format(summary.total_spent),
            summary,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{auth, cart};
    use crate::state::ConfigState;
    use ecofinds_core::MemoryStore;

    #[test]
    fn test_purchases_after_checkout() {
        let market =
            MarketState::open(&ConfigState::default(), Box::new(MemoryStore::new())).unwrap();
        auth::login(&market, "demo@ecofinds.com", "pw").unwrap();

        cart::add_to_cart(&market, "1").unwrap();
        cart::add_to_cart(&market, "10").unwrap();
        cart::checkout(&market).unwrap();

        let response = purchases(&market, GroupingBasis::ListingDate).unwrap();
        let labels: Vec<&str> = response.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["February 2024", "January 2024"]);
        assert_eq!(response.summary.item_count, 2);
        assert_eq!(response.formatted_total_spent, "$110.00");
        assert_eq!(response.summary.category_count, 1);
    }

    #[test]
    fn test_empty_history() {
        let market =
            MarketState::open(&ConfigState::default(), Box::new(MemoryStore::new())).unwrap();
        auth::login(&market, "demo@ecofinds.com", "pw").unwrap();

        let response = purchases(&market, GroupingBasis::PurchaseDate).unwrap();
        assert!(response.groups.is_empty());
        assert_eq!(response.formatted_total_spent, "$0.00");
    }
}
