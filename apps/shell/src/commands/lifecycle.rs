//! # Lifecycle Commands
//!
//! The QR lifecycle tracker: a listing's journey and the carbon its resale
//! avoids.

use serde::Serialize;
use tracing::debug;

use ecofinds_core::{ImpactSummary, ProductJourney};

use crate::error::ApiError;
use crate::state::MarketState;

/// Impact figures as the tracker prints them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedImpact {
    /// e.g. "30.5 kg CO₂"
    pub carbon_saved: String,
    /// e.g. "13 miles not driven"
    pub miles_not_driven: String,
    /// e.g. "1.4 trees planted"
    pub trees_planted: String,
}

impl From<&ImpactSummary> for FormattedImpact {
    fn from(impact: &ImpactSummary) -> Self {
        FormattedImpact {
            carbon_saved: format!("{} kg CO₂", impact.carbon_saved_kg()),
            miles_not_driven: format!("{} miles not driven", impact.miles_not_driven),
            trees_planted: format!("{} trees planted", impact.trees_planted()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResponse {
    pub journey: ProductJourney,
    pub formatted: FormattedImpact,
}

pub fn product_journey(market: &MarketState, product_id: &str) -> Result<JourneyResponse, ApiError> {
    debug!(product_id = %product_id, "product_journey command");
    market.with_market(|m| -> Result<JourneyResponse, ApiError> {
        let journey = m.product_journey(product_id)?;
        Ok(JourneyResponse {
            formatted: FormattedImpact::from(&journey.impact),
            journey,
        })
    })
}
