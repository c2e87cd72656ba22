use super::ranges::stored_value;
use super::state::{EthnicGroup, FilterState, NumericDimension};
use crate::listing::{normalize_flat_type, normalize_town, AmenityKind, TransitMode, UnitRecord};
use crate::metrics::roi_percent;
use std::collections::BTreeSet;

/// Records satisfying every active predicate of `state`, in input order.
pub fn filter_units<'a, I>(records: I, state: &FilterState, mode: TransitMode) -> Vec<&'a UnitRecord>
where
    I: IntoIterator<Item = &'a UnitRecord>,
{
    let towns = normalized(&state.towns, normalize_town);
    let flat_types = normalized(&state.flat_types, normalize_flat_type);

    let matched: Vec<&UnitRecord> = records
        .into_iter()
        .filter(|record| matches(record, state, &towns, &flat_types, mode))
        .collect();

    tracing::debug!(matched = matched.len(), "applied unit filter");
    matched
}

/// Single-record form of [`filter_units`].
pub fn unit_matches(record: &UnitRecord, state: &FilterState, mode: TransitMode) -> bool {
    let towns = normalized(&state.towns, normalize_town);
    let flat_types = normalized(&state.flat_types, normalize_flat_type);
    matches(record, state, &towns, &flat_types, mode)
}

fn normalized(values: &BTreeSet<String>, normalize: fn(&str) -> String) -> BTreeSet<String> {
    values.iter().map(|value| normalize(value)).collect()
}

fn matches(
    record: &UnitRecord,
    state: &FilterState,
    towns: &BTreeSet<String>,
    flat_types: &BTreeSet<String>,
    mode: TransitMode,
) -> bool {
    exercise_matches(record, state.sale_exercise.as_deref())
        && any_of(towns, &normalize_town(&record.town))
        && any_of(flat_types, &normalize_flat_type(&record.flat_type))
        && any_of(&state.projects, &record.project)
        && station_matches(record, &state.stations, mode)
        && AmenityKind::ordered()
            .into_iter()
            .all(|kind| amenity_matches(record, kind, state))
        && NumericDimension::ordered()
            .into_iter()
            .all(|dimension| range_matches(record, state, dimension, mode))
        && ethnic_quota_matches(record, state.ethnic_group)
        && state
            .repurchase
            .map_or(true, |wanted| record.repurchase == Some(wanted))
}

fn exercise_matches(record: &UnitRecord, exercise: Option<&str>) -> bool {
    match exercise.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => record.sale_exercise.trim() == label,
        None => true,
    }
}

fn any_of(selected: &BTreeSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

fn station_matches(record: &UnitRecord, stations: &BTreeSet<String>, mode: TransitMode) -> bool {
    if stations.is_empty() {
        return true;
    }
    record
        .station(mode)
        .is_some_and(|station| stations.contains(station))
}

fn amenity_matches(record: &UnitRecord, kind: AmenityKind, state: &FilterState) -> bool {
    match state.amenities.get(&kind) {
        Some(selected) if !selected.is_empty() => record
            .amenities
            .of_kind(kind)
            .iter()
            .any(|amenity| selected.contains(&amenity.name)),
        _ => true,
    }
}

fn range_matches(
    record: &UnitRecord,
    state: &FilterState,
    dimension: NumericDimension,
    mode: TransitMode,
) -> bool {
    let range = state.range(dimension);
    if !range.is_active() {
        return true;
    }

    match dimension {
        // Only derived lazily when the range is active; undeterminable ROI fails.
        NumericDimension::Roi => roi_percent(record).is_some_and(|roi| range.contains(roi)),
        _ => range.contains(stored_value(record, dimension, mode).unwrap_or(0.0)),
    }
}

fn ethnic_quota_matches(record: &UnitRecord, group: EthnicGroup) -> bool {
    let quota = &record.ethnic_quota;
    match group {
        EthnicGroup::None => true,
        EthnicGroup::Chinese => quota.chinese > 0,
        EthnicGroup::Malay => quota.malay > 0,
        EthnicGroup::IndianOthers => quota.indian_others > 0,
    }
}
