use crate::listing::{normalize_flat_type, normalize_town, DemandRecord, UnitRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized (town, flat type) join key shared by supply and demand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryKey {
    pub town: String,
    pub flat_type: String,
}

impl CategoryKey {
    pub fn new(town: &str, flat_type: &str) -> Self {
        Self {
            town: normalize_town(town),
            flat_type: normalize_flat_type(flat_type),
        }
    }

    pub fn of_unit(record: &UnitRecord) -> Self {
        Self::new(&record.town, &record.flat_type)
    }

    pub fn of_demand(record: &DemandRecord) -> Self {
        Self::new(&record.town, &record.flat_type)
    }
}

/// Summed applicant counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandTotals {
    pub applicants: u32,
    pub first_timer_families: u32,
    pub first_timer_singles: u32,
    pub second_timer_families: u32,
    pub seniors: u32,
    pub units_offered: u32,
}

impl DemandTotals {
    fn add(&mut self, record: &DemandRecord) {
        self.applicants = self.applicants.saturating_add(record.applicants);
        self.first_timer_families = self
            .first_timer_families
            .saturating_add(record.first_timer_families);
        self.first_timer_singles = self
            .first_timer_singles
            .saturating_add(record.first_timer_singles);
        self.second_timer_families = self
            .second_timer_families
            .saturating_add(record.second_timer_families);
        self.seniors = self.seniors.saturating_add(record.seniors);
        self.units_offered = self.units_offered.saturating_add(record.units_offered);
    }
}

/// Unit count per category.
pub fn count_supply<'a, I>(records: I) -> BTreeMap<CategoryKey, u32>
where
    I: IntoIterator<Item = &'a UnitRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(CategoryKey::of_unit(record)).or_insert(0u32) += 1;
    }
    counts
}

/// Applicant totals per category.
pub fn aggregate_demand<'a, I>(records: I) -> BTreeMap<CategoryKey, DemandTotals>
where
    I: IntoIterator<Item = &'a DemandRecord>,
{
    let mut totals: BTreeMap<CategoryKey, DemandTotals> = BTreeMap::new();
    for record in records {
        totals
            .entry(CategoryKey::of_demand(record))
            .or_default()
            .add(record);
    }
    totals
}
