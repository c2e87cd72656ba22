use super::ranges::RangeBounds;
use crate::listing::AmenityKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Numeric filter dimensions. `Roi` is derived per record rather than read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericDimension {
    Price,
    FloorArea,
    PricePerArea,
    WalkMinutes,
    WalkMeters,
    RemainingLease,
    FloorLevel,
    Roi,
}

impl NumericDimension {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Price,
            Self::FloorArea,
            Self::PricePerArea,
            Self::WalkMinutes,
            Self::WalkMeters,
            Self::RemainingLease,
            Self::FloorLevel,
            Self::Roi,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::FloorArea => "Floor Area (sqm)",
            Self::PricePerArea => "Price per sqm",
            Self::WalkMinutes => "Walk to Station (min)",
            Self::WalkMeters => "Walk to Station (m)",
            Self::RemainingLease => "Remaining Lease (years)",
            Self::FloorLevel => "Floor Level",
            Self::Roi => "Estimated ROI (%)",
        }
    }
}

/// Inclusive range; a `None` side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EthnicGroup {
    #[default]
    None,
    Chinese,
    Malay,
    IndianOthers,
}

impl EthnicGroup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Any",
            Self::Chinese => "Chinese",
            Self::Malay => "Malay",
            Self::IndianOthers => "Indian & Others",
        }
    }
}

/// The user's current selections. Updates go through the `with_*` methods,
/// each returning a new state with one field replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub sale_exercise: Option<String>,
    pub towns: BTreeSet<String>,
    pub flat_types: BTreeSet<String>,
    pub projects: BTreeSet<String>,
    pub stations: BTreeSet<String>,
    pub amenities: BTreeMap<AmenityKind, BTreeSet<String>>,
    pub ranges: BTreeMap<NumericDimension, NumericRange>,
    pub ethnic_group: EthnicGroup,
    pub repurchase: Option<bool>,
}

impl FilterState {
    /// Every dimension open: matches every record.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Reset state for a freshly scoped catalog: numeric ranges span the
    /// current bounds. ROI stays open so units without a resale estimate remain
    /// visible until the user narrows it.
    pub fn with_defaults(bounds: &RangeBounds) -> Self {
        let ranges = NumericDimension::ordered()
            .into_iter()
            .filter(|dimension| *dimension != NumericDimension::Roi)
            .map(|dimension| {
                let bound = bounds.get(dimension);
                (dimension, NumericRange::between(bound.min, bound.max))
            })
            .collect();

        Self {
            ranges,
            ..Self::default()
        }
    }

    pub fn range(&self, dimension: NumericDimension) -> NumericRange {
        self.ranges.get(&dimension).copied().unwrap_or_default()
    }

    pub fn with_sale_exercise(self, sale_exercise: Option<String>) -> Self {
        Self {
            sale_exercise,
            ..self
        }
    }

    pub fn with_towns<I, S>(self, towns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            towns: towns.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_flat_types<I, S>(self, flat_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flat_types: flat_types.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_projects<I, S>(self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            projects: projects.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_stations<I, S>(self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stations: stations.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_amenities<I, S>(self, kind: AmenityKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut amenities = self.amenities.clone();
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            amenities.remove(&kind);
        } else {
            amenities.insert(kind, names);
        }
        Self { amenities, ..self }
    }

    pub fn with_range(self, dimension: NumericDimension, range: NumericRange) -> Self {
        let mut ranges = self.ranges.clone();
        ranges.insert(dimension, range);
        Self { ranges, ..self }
    }

    pub fn with_ethnic_group(self, ethnic_group: EthnicGroup) -> Self {
        Self {
            ethnic_group,
            ..self
        }
    }

    pub fn with_repurchase(self, repurchase: Option<bool>) -> Self {
        Self { repurchase, ..self }
    }

    /// Shallow merge: fields the patch leaves unset keep their current value.
    pub fn merge(self, patch: PresetPatch) -> Self {
        let mut ranges = self.ranges.clone();
        ranges.extend(patch.ranges);

        Self {
            towns: patch.towns.unwrap_or(self.towns),
            flat_types: patch.flat_types.unwrap_or(self.flat_types),
            ranges,
            ..self
        }
    }
}

/// Partial filter state produced by a preset: numeric ranges plus the town and
/// flat-type selections. Everything else on the filter is left as it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetPatch {
    pub ranges: BTreeMap<NumericDimension, NumericRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub towns: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_types: Option<BTreeSet<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive_and_open_sides_unbounded() {
        let range = NumericRange::between(10.0, 20.0);
        assert!(range.contains(10.0));
        assert!(range.contains(20.0));
        assert!(!range.contains(20.5));

        let open_top = NumericRange {
            min: Some(5.0),
            max: None,
        };
        assert!(open_top.contains(1e9));
        assert!(!open_top.contains(4.9));
        assert!(!NumericRange::unbounded().is_active());
    }

    #[test]
    fn updates_replace_a_single_field() {
        let base = FilterState::unrestricted().with_towns(["Tengah"]);
        let next = base
            .clone()
            .with_range(NumericDimension::Price, NumericRange::between(0.0, 500_000.0));

        assert_eq!(next.towns, base.towns);
        assert!(next.range(NumericDimension::Price).is_active());
        assert!(!base.range(NumericDimension::Price).is_active());
    }

    #[test]
    fn merge_keeps_fields_the_patch_omits() {
        let state = FilterState::unrestricted()
            .with_sale_exercise(Some("2025-02 BTO".to_string()))
            .with_towns(["Tengah"])
            .with_range(NumericDimension::FloorLevel, NumericRange::between(3.0, 9.0));
        let mut patch = PresetPatch::default();
        patch
            .ranges
            .insert(NumericDimension::Price, NumericRange::between(0.0, 400_000.0));

        let merged = state.merge(patch);

        assert_eq!(merged.sale_exercise.as_deref(), Some("2025-02 BTO"));
        assert!(merged.towns.contains("Tengah"));
        assert_eq!(
            merged.range(NumericDimension::FloorLevel),
            NumericRange::between(3.0, 9.0)
        );
        assert_eq!(
            merged.range(NumericDimension::Price),
            NumericRange::between(0.0, 400_000.0)
        );
    }
}
