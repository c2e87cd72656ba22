use super::state::NumericDimension;
use crate::listing::{TransitMode, UnitRecord};
use crate::metrics::roi_percent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ROI bounds when no record has both a price and a resale estimate.
pub const DEFAULT_ROI_BOUNDS: ValueBounds = ValueBounds::new(-50.0, 100.0);

/// Closed `[min, max]` interval observed over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Value at `fraction` of the way from `min` to `max`.
    pub fn at(&self, fraction: f64) -> f64 {
        self.min + self.span() * fraction
    }

    fn include(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Fallback domain used for an empty record set, so sliders never collapse to a point.
    pub const fn fallback(dimension: NumericDimension) -> Self {
        match dimension {
            NumericDimension::Price => Self::new(0.0, 1_500_000.0),
            NumericDimension::FloorArea => Self::new(0.0, 150.0),
            NumericDimension::PricePerArea => Self::new(0.0, 15_000.0),
            NumericDimension::WalkMinutes => Self::new(0.0, 60.0),
            NumericDimension::WalkMeters => Self::new(0.0, 5_000.0),
            NumericDimension::RemainingLease => Self::new(0.0, 99.0),
            NumericDimension::FloorLevel => Self::new(1.0, 50.0),
            NumericDimension::Roi => DEFAULT_ROI_BOUNDS,
        }
    }
}

/// Bounds for every numeric filter dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub transit_mode: TransitMode,
    pub bounds: BTreeMap<NumericDimension, ValueBounds>,
}

impl RangeBounds {
    pub fn fallback(transit_mode: TransitMode) -> Self {
        Self {
            transit_mode,
            bounds: NumericDimension::ordered()
                .into_iter()
                .map(|dimension| (dimension, ValueBounds::fallback(dimension)))
                .collect(),
        }
    }

    pub fn get(&self, dimension: NumericDimension) -> ValueBounds {
        self.bounds
            .get(&dimension)
            .copied()
            .unwrap_or_else(|| ValueBounds::fallback(dimension))
    }
}

/// Raw (non-derived) value of `dimension` on a record. `Roi` returns `None`.
pub(crate) fn stored_value(
    record: &UnitRecord,
    dimension: NumericDimension,
    mode: TransitMode,
) -> Option<f64> {
    match dimension {
        NumericDimension::Price => record.price,
        NumericDimension::FloorArea => record.floor_area_sqm,
        NumericDimension::PricePerArea => record.price_per_area(),
        NumericDimension::WalkMinutes => record.walk_minutes(mode),
        NumericDimension::WalkMeters => record.walk_meters(mode),
        NumericDimension::RemainingLease => record.remaining_lease_years,
        NumericDimension::FloorLevel => record.floor_level.map(f64::from),
        NumericDimension::Roi => None,
    }
}

/// Full recomputation of bounds over `records`. Missing stored values count as
/// `0`; ROI only considers records where it can be derived.
pub fn compute_ranges<'a, I>(records: I, mode: TransitMode) -> RangeBounds
where
    I: IntoIterator<Item = &'a UnitRecord>,
{
    let mut observed: BTreeMap<NumericDimension, ValueBounds> = BTreeMap::new();
    let mut roi: Option<ValueBounds> = None;
    let mut seen = 0usize;

    for record in records {
        seen += 1;
        for dimension in NumericDimension::ordered() {
            if dimension == NumericDimension::Roi {
                continue;
            }
            let value = stored_value(record, dimension, mode).unwrap_or(0.0);
            observed
                .entry(dimension)
                .and_modify(|bounds| *bounds = bounds.include(value))
                .or_insert(ValueBounds::new(value, value));
        }

        if let Some(value) = roi_percent(record) {
            roi = Some(match roi {
                Some(bounds) => bounds.include(value),
                None => ValueBounds::new(value, value),
            });
        }
    }

    if seen == 0 {
        return RangeBounds::fallback(mode);
    }

    observed.insert(NumericDimension::Roi, roi.unwrap_or(DEFAULT_ROI_BOUNDS));
    tracing::debug!(records = seen, transit_mode = mode.label(), "computed filter bounds");

    RangeBounds {
        transit_mode: mode,
        bounds: observed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::TransitAccess;

    fn unit(price: Option<f64>, resale: Option<f64>, floor: Option<u32>) -> UnitRecord {
        UnitRecord {
            price,
            estimated_resale_value: resale,
            floor_level: floor,
            ..UnitRecord::default()
        }
    }

    #[test]
    fn empty_catalog_uses_fallback_domain() {
        let bounds = compute_ranges(&Vec::<UnitRecord>::new(), TransitMode::RailOnly);
        let price = bounds.get(NumericDimension::Price);
        assert!(price.max > price.min);
        assert_eq!(bounds.get(NumericDimension::Roi), DEFAULT_ROI_BOUNDS);
    }

    #[test]
    fn missing_values_count_as_zero() {
        let records = vec![
            unit(Some(300_000.0), None, Some(4)),
            unit(None, None, Some(12)),
        ];

        let bounds = compute_ranges(&records, TransitMode::RailOnly);

        assert_eq!(
            bounds.get(NumericDimension::Price),
            ValueBounds::new(0.0, 300_000.0)
        );
        assert_eq!(
            bounds.get(NumericDimension::FloorLevel),
            ValueBounds::new(4.0, 12.0)
        );
    }

    #[test]
    fn roi_bounds_only_cover_qualifying_records() {
        let records = vec![
            unit(Some(500_000.0), Some(650_000.0), None),
            unit(Some(400_000.0), Some(380_000.0), None),
            unit(Some(300_000.0), None, None),
        ];

        let bounds = compute_ranges(&records, TransitMode::RailOnly);
        let roi = bounds.get(NumericDimension::Roi);

        assert!((roi.min - -5.0).abs() < 1e-9);
        assert!((roi.max - 30.0).abs() < 1e-9);
    }

    #[test]
    fn roi_defaults_when_nothing_qualifies() {
        let records = vec![unit(Some(300_000.0), None, None)];
        let bounds = compute_ranges(&records, TransitMode::RailOnly);
        assert_eq!(bounds.get(NumericDimension::Roi), DEFAULT_ROI_BOUNDS);
    }

    #[test]
    fn walking_bounds_follow_transit_mode() {
        let records = vec![UnitRecord {
            transit: TransitAccess {
                station: None,
                walk_minutes: Some(14.0),
                walk_meters: Some(1_100.0),
            },
            transit_with_light_rail: Some(TransitAccess {
                station: None,
                walk_minutes: Some(3.0),
                walk_meters: None,
            }),
            ..UnitRecord::default()
        }];

        let rail = compute_ranges(&records, TransitMode::RailOnly);
        let light = compute_ranges(&records, TransitMode::WithLightRail);

        assert_eq!(rail.get(NumericDimension::WalkMinutes).max, 14.0);
        assert_eq!(light.get(NumericDimension::WalkMinutes).max, 3.0);
        assert_eq!(light.get(NumericDimension::WalkMeters).max, 1_100.0);
    }
}
