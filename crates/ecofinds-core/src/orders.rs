//! # Order History
//!
//! Append-only record of everything the user has bought, plus the
//! month-grouped view the Purchases screen renders.
//!
//! ## Month Grouping
//! ```text
//! history (arrival order)              group_by_month(ListingDate)
//! ─────────────────────────            ───────────────────────────
//! Jacket  (listed 2024-01-15)          "February 2024": [Lamp, Bike]
//! Lamp    (listed 2024-02-03)    ──►   "January 2024":  [Jacket, Desk]
//! Desk    (listed 2024-01-20)
//! Bike    (listed 2024-02-16)          groups newest first,
//!                                      arrival order inside a group
//! ```
//!
//! Grouping defaults to the listing's creation date, which is what the
//! Purchases screen has always shown. [`GroupingBasis::PurchaseDate`]
//! groups by checkout time instead.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// A product snapshot captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseRecord {
    pub product: Product,

    #[ts(as = "String")]
    pub purchased_at: DateTime<Utc>,
}

impl PurchaseRecord {
    fn timestamp(&self, basis: GroupingBasis) -> DateTime<Utc> {
        match basis {
            GroupingBasis::ListingDate => self.product.created_at,
            GroupingBasis::PurchaseDate => self.purchased_at,
        }
    }
}

/// Which timestamp decides a purchase's month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum GroupingBasis {
    #[default]
    ListingDate,
    PurchaseDate,
}

/// One "Month Year" section of the Purchases screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MonthGroup {
    /// e.g. "January 2024"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub purchases: Vec<PurchaseRecord>,
}

/// Append-only purchase history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderHistory {
    records: Vec<PurchaseRecord>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `products` in order, stamped with the current time.
    pub fn record_purchases(&mut self, products: Vec<Product>) {
        self.record_purchases_at(products, Utc::now());
    }

    /// Appends `products` in order with an explicit purchase time.
    pub fn record_purchases_at(&mut self, products: Vec<Product>, purchased_at: DateTime<Utc>) {
        self.records.extend(products.into_iter().map(|product| PurchaseRecord {
            product,
            purchased_at,
        }));
    }

    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Groups purchases by calendar month (UTC).
    ///
    /// ## Returns
    /// Groups ordered newest month first. Within a group, purchases keep
    /// the order they were recorded in.
    pub fn group_by_month(&self, basis: GroupingBasis) -> Vec<MonthGroup> {
        let mut groups: Vec<MonthGroup> = Vec::new();

        for record in &self.records {
            let at = record.timestamp(basis);
            let (year, month) = (at.year(), at.month());

            match groups.iter_mut().find(|g| g.year == year && g.month == month) {
                Some(group) => group.purchases.push(record.clone()),
                None => groups.push(MonthGroup {
                    label: at.format("%B %Y").to_string(),
                    year,
                    month,
                    purchases: vec![record.clone()],
                }),
            }
        }

        groups.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        groups
    }

    pub fn summary(&self) -> PurchaseSummary {
        PurchaseSummary::from_records(&self.records)
    }
}

/// Figures shown at the top of the Purchases screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseSummary {
    pub item_count: usize,
    pub total_spent: Money,
    pub category_count: usize,
}

impl PurchaseSummary {
    pub fn from_records(records: &[PurchaseRecord]) -> Self {
        let categories: BTreeSet<_> = records.iter().map(|r| r.product.category).collect();
        PurchaseSummary {
            item_count: records.len(),
            total_spent: records.iter().map(|r| r.product.price).sum(),
            category_count: categories.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
