use crate::listing::{normalize_flat_type, normalize_town, AmenityKind, TransitMode, UnitRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct option values for the multi-select dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetOptions {
    pub towns: Vec<String>,
    pub flat_types: Vec<String>,
    pub projects: Vec<String>,
    pub stations: Vec<String>,
    pub amenities: BTreeMap<AmenityKind, Vec<String>>,
}

pub fn collect_facets<'a, I>(records: I, mode: TransitMode) -> FacetOptions
where
    I: IntoIterator<Item = &'a UnitRecord>,
{
    let mut towns = BTreeSet::new();
    let mut flat_types = BTreeSet::new();
    let mut projects = BTreeSet::new();
    let mut stations = BTreeSet::new();
    let mut amenities: BTreeMap<AmenityKind, BTreeSet<String>> = BTreeMap::new();

    for record in records {
        insert_non_empty(&mut towns, normalize_town(&record.town));
        insert_non_empty(&mut flat_types, normalize_flat_type(&record.flat_type));
        insert_non_empty(&mut projects, record.project.trim().to_string());
        if let Some(station) = record.station(mode) {
            insert_non_empty(&mut stations, station.trim().to_string());
        }
        for kind in AmenityKind::ordered() {
            let names = amenities.entry(kind).or_default();
            for amenity in record.amenities.of_kind(kind) {
                insert_non_empty(names, amenity.name.trim().to_string());
            }
        }
    }

    FacetOptions {
        towns: towns.into_iter().collect(),
        flat_types: flat_types.into_iter().collect(),
        projects: projects.into_iter().collect(),
        stations: stations.into_iter().collect(),
        amenities: amenities
            .into_iter()
            .map(|(kind, names)| (kind, names.into_iter().collect()))
            .collect(),
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: String) {
    if !value.is_empty() {
        set.insert(value);
    }
}
