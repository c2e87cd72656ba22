//! End-to-end pass: scope the catalog to a sale exercise, compute slider
//! bounds, filter, then derive per-unit metrics, ballot odds and chart data.

use crate::ballot::{build_combo_stats, BallotView, ComboStat, SupplyPolicy};
use crate::listing::{available_exercises, scope_to_exercise, DemandRecord, TransitMode, UnitRecord};
use crate::metrics::{
    completion_timeline, derive_unit_metrics, floor_tier_summary, lease_decay, FloorTierEntry,
    FloorTierIndex, LeaseDecayEntry, TimelineEntry, UnitMetrics,
};
use crate::search::{collect_facets, compute_ranges, filter_units, FacetOptions, FilterState, RangeBounds};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardOptions {
    pub transit_mode: TransitMode,
    pub ballot_view: BallotView,
    pub policy: SupplyPolicy,
}

/// A filtered unit together with its derived values.
#[derive(Debug, Clone, Serialize)]
pub struct UnitView {
    pub unit: UnitRecord,
    pub metrics: UnitMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub sale_exercises: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_exercise: Option<String>,
    pub scoped_units: usize,
    pub bounds: RangeBounds,
    pub facets: FacetOptions,
    pub units: Vec<UnitView>,
    pub ballot: Vec<ComboStat>,
    pub timeline: Vec<TimelineEntry>,
    pub floor_tiers: Vec<FloorTierEntry>,
    pub lease_decay: Vec<LeaseDecayEntry>,
}

impl Dashboard {
    pub fn build(
        catalog: &[UnitRecord],
        demand: &[DemandRecord],
        filter: &FilterState,
        options: &DashboardOptions,
        today: NaiveDate,
    ) -> Self {
        let exercise = filter
            .sale_exercise
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty());
        let scoped = scope_to_exercise(catalog, exercise);
        let mode = options.transit_mode;

        let bounds = compute_ranges(scoped.iter().copied(), mode);
        let facets = collect_facets(scoped.iter().copied(), mode);
        let filtered = filter_units(scoped.iter().copied(), filter, mode);

        let tiers = FloorTierIndex::build(scoped.iter().copied());
        let metrics = derive_unit_metrics(&filtered, &tiers, today);

        let scoped_demand = demand.iter().filter(|record| {
            let label = record.sale_exercise.trim();
            match exercise {
                Some(selected) => label.is_empty() || label == selected,
                None => true,
            }
        });
        let ballot = build_combo_stats(
            filtered.iter().copied(),
            scoped.iter().copied(),
            scoped_demand,
            options.ballot_view,
            &options.policy,
        );

        let timeline = completion_timeline(&metrics);
        let floor_tiers = floor_tier_summary(&filtered, &metrics);
        let decay = lease_decay(&filtered, &metrics);

        debug!(
            scoped = scoped.len(),
            matched = filtered.len(),
            categories = ballot.len(),
            "dashboard pass complete"
        );

        let units = filtered
            .iter()
            .zip(metrics)
            .map(|(unit, metrics)| UnitView {
                unit: (*unit).clone(),
                metrics,
            })
            .collect();

        Self {
            sale_exercises: available_exercises(catalog),
            sale_exercise: exercise.map(str::to_string),
            scoped_units: scoped.len(),
            bounds,
            facets,
            units,
            ballot,
            timeline,
            floor_tiers,
            lease_decay: decay,
        }
    }
}

/// Bounds for the catalog scoped to `exercise`, used to reset a filter.
pub fn bounds_for_exercise(
    catalog: &[UnitRecord],
    exercise: Option<&str>,
    mode: TransitMode,
) -> RangeBounds {
    compute_ranges(scope_to_exercise(catalog, exercise), mode)
}
