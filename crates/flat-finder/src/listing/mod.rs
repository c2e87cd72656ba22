//! Unit catalog and demand statistics: record shapes, key normalization, and loading.

pub mod domain;
mod fields;
pub mod loader;
pub mod normalizer;

pub use domain::{
    Amenity, AmenityKind, CompletionDate, DemandRecord, EthnicQuota, NearbyAmenities,
    TransitAccess, TransitMode, UnitKey, UnitRecord,
};
pub use loader::{
    load_catalog_json, load_catalog_path, load_demand_csv, load_demand_json, load_demand_path,
    CatalogLoadError,
};
pub use normalizer::{normalize_flat_type, normalize_town};

use std::collections::BTreeSet;

/// Distinct sale-exercise labels present in a catalog, sorted.
pub fn available_exercises(catalog: &[UnitRecord]) -> Vec<String> {
    catalog
        .iter()
        .map(|record| record.sale_exercise.trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records belonging to `exercise`, or the whole catalog when none is selected.
pub fn scope_to_exercise<'a>(catalog: &'a [UnitRecord], exercise: Option<&str>) -> Vec<&'a UnitRecord> {
    match exercise.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => catalog
            .iter()
            .filter(|record| record.sale_exercise.trim() == label)
            .collect(),
        None => catalog.iter().collect(),
    }
}
