//! # Product Lifecycle
//!
//! The journey a second-hand item took before it reached the marketplace,
//! and the carbon its resale avoids.
//!
//! ## Impact Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Journey → Impact                                     │
//! │                                                                         │
//! │  Raw Material Source   +8.2 kg ┐                                        │
//! │  Manufacturing        +15.7 kg │  emitted (shown, not counted)          │
//! │  Shipping             +12.3 kg │                                        │
//! │  Packaging             +3.1 kg ┘                                        │
//! │  Consumer Use          -5.0 kg ┐                                        │
//! │  Second-Hand Sale     -25.5 kg ┘  saved = 30.5 kg                       │
//! │                                        │                                │
//! │                                        ├── ÷ 2.31 kg  → 13 miles        │
//! │                                        └── ÷ 21.77 kg → 1.4 trees       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Footprints are integer grams so the totals never drift.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::types::Product;

/// CO₂ a passenger car emits per mile driven.
pub const GRAMS_CO2_PER_MILE: i64 = 2_310;

/// CO₂ one tree absorbs per year.
pub const GRAMS_CO2_PER_TREE: i64 = 21_770;

/// Which step of the journey a stage is; the frontend picks its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum StageKind {
    RawMaterial,
    Manufacturing,
    Shipping,
    Packaging,
    ConsumerUse,
    Resale,
}

/// One step of a product's journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LifecycleStage {
    pub kind: StageKind,
    pub title: String,
    pub location: String,
    /// A day (`2023-01-15`) or a span (`2023-04-01 - 2024-01-15`).
    pub date: String,
    /// Emitted when positive, avoided when negative.
    pub footprint_grams: i64,
    pub description: String,
}

impl LifecycleStage {
    fn new(
        kind: StageKind,
        title: &str,
        location: &str,
        date: String,
        footprint_grams: i64,
        description: &str,
    ) -> Self {
        LifecycleStage {
            kind,
            title: title.to_string(),
            location: location.to_string(),
            date,
            footprint_grams,
            description: description.to_string(),
        }
    }
}

/// Carbon avoided by a journey, with everyday equivalents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImpactSummary {
    /// Sum of the negative footprints, as a positive number.
    pub carbon_saved_grams: i64,
    /// Rounded to whole miles.
    pub miles_not_driven: i64,
    /// Rounded to tenths of a tree (14 = 1.4 trees).
    pub trees_planted_tenths: i64,
}

impl ImpactSummary {
    pub fn from_stages(stages: &[LifecycleStage]) -> Self {
        let saved = stages
            .iter()
            .filter(|s| s.footprint_grams < 0)
            .fold(0i64, |total, s| total.saturating_add(s.footprint_grams.saturating_abs()));

        ImpactSummary {
            carbon_saved_grams: saved,
            miles_not_driven: div_round(saved, GRAMS_CO2_PER_MILE),
            trees_planted_tenths: div_round(saved.saturating_mul(10), GRAMS_CO2_PER_TREE),
        }
    }

    /// `30500` → `"30.5"`
    pub fn carbon_saved_kg(&self) -> String {
        tenths_label(div_round(self.carbon_saved_grams, 100))
    }

    /// `14` → `"1.4"`
    pub fn trees_planted(&self) -> String {
        tenths_label(self.trees_planted_tenths)
    }
}

/// The traced journey of one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductJourney {
    pub product_id: String,
    /// e.g. "Vintage Denim Jacket - ID: 1"
    pub label: String,
    pub stages: Vec<LifecycleStage>,
    pub impact: ImpactSummary,
}

/// Builds the journey shown for `product`.
///
/// Supply-chain data is not tracked per listing, so every product shares
/// the same reference journey up to its own resale, which is dated by the
/// listing's creation day.
pub fn journey_for(product: &Product) -> ProductJourney {
    let listed = product.created_at.format("%Y-%m-%d").to_string();

    let stages = vec![
        LifecycleStage::new(
            StageKind::RawMaterial,
            "Raw Material Source",
            "Cotton Farm, India",
            "2023-01-15".to_string(),
            8_200,
            "Organic cotton harvested from sustainable farm",
        ),
        LifecycleStage::new(
            StageKind::Manufacturing,
            "Manufacturing",
            "Textile Mill, Bangladesh",
            "2023-02-20".to_string(),
            15_700,
            "Fabric woven and dyed using eco-friendly processes",
        ),
        LifecycleStage::new(
            StageKind::Shipping,
            "Shipping",
            "Port of Los Angeles, USA",
            "2023-03-10".to_string(),
            12_300,
            "Shipped via cargo container - low emissions transport",
        ),
        LifecycleStage::new(
            StageKind::Packaging,
            "Packaging",
            "Distribution Center, California",
            "2023-03-20".to_string(),
            3_100,
            "Packaged in recyclable materials",
        ),
        LifecycleStage::new(
            StageKind::ConsumerUse,
            "Consumer Use",
            "Previous Owner",
            format!("2023-04-01 - {}", listed),
            -5_000,
            "Used and well maintained by its previous owner",
        ),
        LifecycleStage::new(
            StageKind::Resale,
            "Second-Hand Sale",
            "EcoFinds Marketplace",
            listed,
            -25_500,
            "Extending product lifecycle through resale",
        ),
    ];

    ProductJourney {
        product_id: product.id.clone(),
        label: format!("{} - ID: {}", product.title, product.id),
        impact: ImpactSummary::from_stages(&stages),
        stages,
    }
}

/// Products the cart keeps out of landfill: one per distinct listing.
pub fn items_saved(cart: &Cart) -> usize {
    cart.entry_count()
}

/// Non-negative division, rounding half up.
fn div_round(numerator: i64, denominator: i64) -> i64 {
    numerator.saturating_add(denominator / 2) / denominator
}

fn tenths_label(tenths: i64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Category;
    use chrono::{TimeZone, Utc};

    fn jacket() -> Product {
        Product {
            id: "1".to_string(),
            title: "Vintage Denim Jacket".to_string(),
            category: Category::Clothing,
            description: String::new(),
            price: Money::from_dollars(45),
            seller_id: "user2".to_string(),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_journey_has_six_stages_ending_in_resale() {
        let journey = journey_for(&jacket());

        assert_eq!(journey.stages.len(), 6);
        assert_eq!(journey.stages[0].kind, StageKind::RawMaterial);
        assert_eq!(journey.stages[5].kind, StageKind::Resale);
        assert_eq!(journey.stages[5].date, "2024-01-15");
        assert_eq!(journey.stages[4].date, "2023-04-01 - 2024-01-15");
        assert_eq!(journey.label, "Vintage Denim Jacket - ID: 1");
    }

    #[test]
    fn test_impact_counts_only_avoided_carbon() {
        let impact = journey_for(&jacket()).impact;

        assert_eq!(impact.carbon_saved_grams, 30_500);
        assert_eq!(impact.carbon_saved_kg(), "30.5");
        assert_eq!(impact.miles_not_driven, 13);
        assert_eq!(impact.trees_planted_tenths, 14);
        assert_eq!(impact.trees_planted(), "1.4");
    }

    #[test]
    fn test_impact_of_emitting_stages_is_zero() {
        let stages: Vec<LifecycleStage> = journey_for(&jacket())
            .stages
            .into_iter()
            .filter(|s| s.footprint_grams > 0)
            .collect();

        assert_eq!(ImpactSummary::from_stages(&stages), ImpactSummary::default());
        assert_eq!(ImpactSummary::default().carbon_saved_kg(), "0.0");
    }

    #[test]
    fn test_items_saved_counts_distinct_products() {
        let mut cart = Cart::new();
        assert_eq!(items_saved(&cart), 0);

        let mut other = jacket();
        other.id = "2".to_string();
        cart.add_to_cart(&jacket()).unwrap();
        cart.add_to_cart(&jacket()).unwrap();
        cart.add_to_cart(&other).unwrap();
        assert_eq!(items_saved(&cart), 2);
    }

    #[test]
    fn test_stage_kind_wire_names() {
        let json = serde_json::to_string(&StageKind::ConsumerUse).unwrap();
        assert_eq!(json, "\"consumer-use\"");
    }
}
