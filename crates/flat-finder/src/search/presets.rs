use super::ranges::RangeBounds;
use super::state::{NumericDimension, NumericRange, PresetPatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Named bundles of filter values, each scaled to the current bounds so they
/// stay meaningful across sale exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetProfile {
    BestValue,
    NearTransit,
    FamilySized,
    HighFloor,
    LongLease,
}

impl PresetProfile {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BestValue,
            Self::NearTransit,
            Self::FamilySized,
            Self::HighFloor,
            Self::LongLease,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::BestValue => "best_value",
            Self::NearTransit => "near_transit",
            Self::FamilySized => "family_sized",
            Self::HighFloor => "high_floor",
            Self::LongLease => "long_lease",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BestValue => "Best Value",
            Self::NearTransit => "Near Transit",
            Self::FamilySized => "Family Sized",
            Self::HighFloor => "High Floor",
            Self::LongLease => "Long Lease",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let wanted = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|profile| profile.key() == wanted)
    }

    pub fn patch(self, bounds: &RangeBounds) -> PresetPatch {
        let mut patch = PresetPatch::default();
        match self {
            Self::BestValue => {
                let per_area = bounds.get(NumericDimension::PricePerArea);
                patch.ranges.insert(
                    NumericDimension::PricePerArea,
                    NumericRange::between(per_area.min, per_area.at(0.4)),
                );
                let roi = bounds.get(NumericDimension::Roi);
                patch.ranges.insert(
                    NumericDimension::Roi,
                    NumericRange::between(roi.at(0.5), roi.max),
                );
            }
            Self::NearTransit => {
                let minutes = bounds.get(NumericDimension::WalkMinutes);
                patch.ranges.insert(
                    NumericDimension::WalkMinutes,
                    NumericRange::between(minutes.min, minutes.at(0.25)),
                );
                let meters = bounds.get(NumericDimension::WalkMeters);
                patch.ranges.insert(
                    NumericDimension::WalkMeters,
                    NumericRange::between(meters.min, meters.at(0.25)),
                );
            }
            Self::FamilySized => {
                let area = bounds.get(NumericDimension::FloorArea);
                patch.ranges.insert(
                    NumericDimension::FloorArea,
                    NumericRange::between(area.at(0.5), area.max),
                );
                patch.flat_types = Some(BTreeSet::from([
                    "4-Room".to_string(),
                    "5-Room".to_string(),
                ]));
            }
            Self::HighFloor => {
                let floor = bounds.get(NumericDimension::FloorLevel);
                patch.ranges.insert(
                    NumericDimension::FloorLevel,
                    NumericRange::between(floor.at(0.6).ceil(), floor.max),
                );
            }
            Self::LongLease => {
                let lease = bounds.get(NumericDimension::RemainingLease);
                patch.ranges.insert(
                    NumericDimension::RemainingLease,
                    NumericRange::between(lease.at(0.75), lease.max),
                );
            }
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::TransitMode;
    use crate::search::ranges::ValueBounds;
    use crate::search::state::FilterState;

    fn bounds() -> RangeBounds {
        let mut bounds = RangeBounds::fallback(TransitMode::RailOnly);
        bounds
            .bounds
            .insert(NumericDimension::FloorLevel, ValueBounds::new(2.0, 32.0));
        bounds
            .bounds
            .insert(NumericDimension::WalkMinutes, ValueBounds::new(4.0, 24.0));
        bounds
    }

    #[test]
    fn presets_scale_with_current_bounds() {
        let patch = PresetProfile::HighFloor.patch(&bounds());
        assert_eq!(
            patch.ranges[&NumericDimension::FloorLevel],
            NumericRange::between(20.0, 32.0)
        );

        let patch = PresetProfile::NearTransit.patch(&bounds());
        assert_eq!(
            patch.ranges[&NumericDimension::WalkMinutes],
            NumericRange::between(4.0, 9.0)
        );
    }

    #[test]
    fn applying_a_preset_keeps_the_sale_exercise() {
        let state = FilterState::unrestricted()
            .with_sale_exercise(Some("2025-10 BTO".to_string()))
            .with_towns(["Tengah"]);

        let merged = state.merge(PresetProfile::FamilySized.patch(&bounds()));

        assert_eq!(merged.sale_exercise.as_deref(), Some("2025-10 BTO"));
        assert!(merged.towns.contains("Tengah"));
        assert!(merged.flat_types.contains("5-Room"));
    }

    #[test]
    fn long_lease_leaves_the_repurchase_choice_alone() {
        let state = FilterState::unrestricted()
            .with_repurchase(Some(false))
            .with_ethnic_group(crate::search::state::EthnicGroup::Malay);

        let merged = state.clone().merge(PresetProfile::LongLease.patch(&bounds()));

        assert_eq!(merged.repurchase, Some(false));
        assert_eq!(merged.ethnic_group, state.ethnic_group);
        assert!(merged
            .range(NumericDimension::RemainingLease)
            .is_active());
    }

    #[test]
    fn keys_round_trip_through_lookup() {
        for profile in PresetProfile::ordered() {
            assert_eq!(PresetProfile::from_key(profile.key()), Some(profile));
        }
        assert_eq!(
            PresetProfile::from_key("near-transit"),
            Some(PresetProfile::NearTransit)
        );
        assert!(PresetProfile::from_key("penthouse").is_none());
    }
}
