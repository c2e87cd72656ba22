use super::completion::CompletionBucket;
use super::floor::FloorTier;
use super::UnitMetrics;
use crate::listing::{normalize_flat_type, UnitRecord};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub bucket: CompletionBucket,
    pub label: String,
    pub units: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorTierEntry {
    pub tier: FloorTier,
    pub tier_label: &'static str,
    pub units: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_price_per_area: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseDecayEntry {
    pub flat_type: String,
    pub units: usize,
    pub mean_remaining_lease: f64,
    pub mean_price_per_lease_year: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Unit counts per completion bucket, completed first.
pub fn completion_timeline(metrics: &[UnitMetrics]) -> Vec<TimelineEntry> {
    let mut counts: BTreeMap<CompletionBucket, usize> = BTreeMap::new();
    for bucket in metrics.iter().filter_map(|entry| entry.completion) {
        *counts.entry(bucket).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(bucket, units)| TimelineEntry {
            bucket,
            label: bucket.label(),
            units,
        })
        .collect()
}

/// Per floor tier: unit count and mean price per sqm. `records` and `metrics` are parallel.
pub fn floor_tier_summary(records: &[&UnitRecord], metrics: &[UnitMetrics]) -> Vec<FloorTierEntry> {
    let mut tiers: BTreeMap<FloorTier, (usize, Mean)> = BTreeMap::new();
    for (record, entry) in records.iter().zip(metrics) {
        let Some(tier) = entry.floor_tier else {
            continue;
        };
        let (units, mean) = tiers.entry(tier).or_default();
        *units += 1;
        if let Some(per_area) = record.price_per_area() {
            mean.push(per_area);
        }
    }

    FloorTier::ordered()
        .into_iter()
        .filter_map(|tier| {
            tiers.get(&tier).map(|(units, mean)| FloorTierEntry {
                tier,
                tier_label: tier.label(),
                units: *units,
                mean_price_per_area: mean.value(),
            })
        })
        .collect()
}

/// Per flat type: mean remaining lease against mean price per remaining lease year.
pub fn lease_decay(records: &[&UnitRecord], metrics: &[UnitMetrics]) -> Vec<LeaseDecayEntry> {
    let mut groups: BTreeMap<String, (Mean, Mean)> = BTreeMap::new();
    for (record, entry) in records.iter().zip(metrics) {
        let (Some(per_year), Some(lease)) = (entry.price_per_lease_year, record.remaining_lease_years)
        else {
            continue;
        };
        let (lease_mean, per_year_mean) = groups
            .entry(normalize_flat_type(&record.flat_type))
            .or_default();
        lease_mean.push(lease);
        per_year_mean.push(per_year);
    }

    groups
        .into_iter()
        .filter_map(|(flat_type, (lease_mean, per_year_mean))| {
            Some(LeaseDecayEntry {
                flat_type,
                units: lease_mean.count,
                mean_remaining_lease: lease_mean.value()?,
                mean_price_per_lease_year: per_year_mean.value()?,
            })
        })
        .collect()
}
