//! Per-unit derived analytics and the chart aggregates built from them.

pub mod completion;
pub mod floor;
pub mod lease;
pub mod roi;
pub mod summary;

pub use completion::{completion_bucket, CompletionBucket};
pub use floor::{BuildingSpan, FloorTier, FloorTierIndex};
pub use lease::{price_per_lease_year, price_per_lease_year_from};
pub use roi::{roi_from, roi_percent};
pub use summary::{
    completion_timeline, floor_tier_summary, lease_decay, FloorTierEntry, LeaseDecayEntry,
    TimelineEntry,
};

use crate::listing::{UnitKey, UnitRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Derived values for one unit; `key` ties them back to the source record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitMetrics {
    pub key: UnitKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_lease_year: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_tier: Option<FloorTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionBucket>,
}

impl UnitMetrics {
    pub fn derive(record: &UnitRecord, tiers: &FloorTierIndex, today: NaiveDate) -> Self {
        Self {
            key: record.key(),
            roi_percent: roi_percent(record),
            price_per_lease_year: price_per_lease_year(record),
            floor_tier: tiers.tier_of(record),
            completion: completion_bucket(record.completion.as_ref(), today),
        }
    }
}

/// Metrics parallel to `records`; floor tiers are relative to blocks in `tiers`.
pub fn derive_unit_metrics(
    records: &[&UnitRecord],
    tiers: &FloorTierIndex,
    today: NaiveDate,
) -> Vec<UnitMetrics> {
    records
        .iter()
        .map(|record| UnitMetrics::derive(record, tiers, today))
        .collect()
}
