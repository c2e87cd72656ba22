use super::aggregate::{aggregate_demand, count_supply, CategoryKey, DemandTotals};
use super::policy::SupplyPolicy;
use crate::listing::{DemandRecord, UnitRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which applicant pool the odds are computed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotView {
    /// Every applicant competes for every listed unit.
    #[default]
    AllApplicants,
    /// First-timer families competing for the units they would realistically accept.
    FirstTimerFamilies,
}

impl BallotView {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllApplicants => "All applicants",
            Self::FirstTimerFamilies => "First-timer families",
        }
    }

    pub(crate) fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "all_applicants" => Some(Self::AllApplicants),
            "first_timer_families" | "ftf" => Some(Self::FirstTimerFamilies),
            _ => None,
        }
    }
}

/// Balloting odds for one (town, flat type) category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboStat {
    pub town: String,
    pub flat_type: String,
    /// Units in the category that survive the current filter.
    pub supply: u32,
    pub adjusted_supply: u32,
    /// Units in the category before filtering.
    pub category_supply: u32,
    pub category_adjusted_supply: u32,
    /// Applicant pool used as the denominator for this view.
    pub demand: u32,
    pub demand_breakdown: DemandTotals,
    /// Odds of securing one of the filtered units.
    pub probability: f64,
    /// Odds of securing any unit in the category.
    pub category_probability: f64,
}

/// One row per category present in `filtered`, highest odds first.
pub fn build_combo_stats<'a, 'b, F, C, D>(
    filtered: F,
    category_catalog: C,
    demand: D,
    view: BallotView,
    policy: &SupplyPolicy,
) -> Vec<ComboStat>
where
    F: IntoIterator<Item = &'a UnitRecord>,
    C: IntoIterator<Item = &'a UnitRecord>,
    D: IntoIterator<Item = &'b DemandRecord>,
{
    let supply = count_supply(filtered);
    let category_supply = count_supply(category_catalog);
    let demand = aggregate_demand(demand);

    let mut stats: Vec<ComboStat> = supply
        .into_iter()
        .map(|(key, raw)| {
            let totals = demand.get(&key).copied().unwrap_or_default();
            let category_raw = category_supply.get(&key).copied().unwrap_or(raw).max(raw);
            combo_stat(key, raw, category_raw, totals, view, policy)
        })
        .collect();

    stats.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });

    tracing::debug!(categories = stats.len(), view = view.label(), "built ballot odds");
    stats
}

fn combo_stat(
    key: CategoryKey,
    raw: u32,
    category_raw: u32,
    totals: DemandTotals,
    view: BallotView,
    policy: &SupplyPolicy,
) -> ComboStat {
    let adjusted = policy.desirable_supply(&key.flat_type, raw);
    let category_adjusted = policy.desirable_supply(&key.flat_type, category_raw);

    let (demand, numerator, category_numerator) = match view {
        BallotView::AllApplicants => (totals.applicants, raw, category_raw),
        BallotView::FirstTimerFamilies => {
            (totals.first_timer_families, adjusted, category_adjusted)
        }
    };

    ComboStat {
        town: key.town,
        flat_type: key.flat_type,
        supply: raw,
        adjusted_supply: adjusted,
        category_supply: category_raw,
        category_adjusted_supply: category_adjusted,
        demand,
        demand_breakdown: totals,
        probability: policy.probability(numerator, demand),
        category_probability: policy.probability(category_numerator, demand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(town: &str, flat_type: &str, project: &str) -> UnitRecord {
        UnitRecord {
            town: town.to_string(),
            flat_type: flat_type.to_string(),
            project: project.to_string(),
            ..UnitRecord::default()
        }
    }

    fn demand(town: &str, flat_type: &str, applicants: u32, families: u32) -> DemandRecord {
        DemandRecord {
            town: town.to_string(),
            flat_type: flat_type.to_string(),
            applicants,
            first_timer_families: families,
            ..DemandRecord::default()
        }
    }

    #[test]
    fn missing_demand_means_no_competition() {
        let catalog = vec![unit("Tengah", "4-Room", "Plantation Grange")];

        let stats = build_combo_stats(
            &catalog,
            &catalog,
            &Vec::<DemandRecord>::new(),
            BallotView::AllApplicants,
            &SupplyPolicy::default(),
        );

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].demand, 0);
        assert_eq!(stats[0].probability, 0.99);
        assert_eq!(stats[0].category_probability, 0.99);
    }

    #[test]
    fn first_timer_view_uses_adjusted_supply_and_family_pool() {
        let catalog: Vec<UnitRecord> = (0..100)
            .map(|_| unit("Tengah", "2-Room Flexi", "Plantation Grange"))
            .collect();
        let filtered: Vec<&UnitRecord> = catalog.iter().take(40).collect();
        let demand = vec![demand("Tengah", "2-Room Flexi", 1_000, 200)];

        let stats = build_combo_stats(
            filtered,
            &catalog,
            &demand,
            BallotView::FirstTimerFamilies,
            &SupplyPolicy::default(),
        );

        let stat = &stats[0];
        assert_eq!(stat.supply, 40);
        assert_eq!(stat.adjusted_supply, 21);
        assert_eq!(stat.category_adjusted_supply, 54);
        assert_eq!(stat.demand, 200);
        assert!((stat.probability - 21.0 / 200.0).abs() < 1e-12);
        assert!((stat.category_probability - 54.0 / 200.0).abs() < 1e-12);
    }

    #[test]
    fn rows_are_sorted_by_odds_and_bounded() {
        let catalog = vec![
            unit("Tengah", "4-Room", "A"),
            unit("Tengah", "4-Room", "A"),
            unit("Sengkang", "4-Room", "B"),
            unit("Queenstown", "Community Care Apartment", "C"),
        ];
        let demand = vec![
            demand("Tengah", "4-Room", 10, 5),
            demand("Sengkang", "4-Room", 100, 40),
            demand("Queenstown", "Community Care Apartment", 50, 0),
        ];

        let all = build_combo_stats(
            &catalog,
            &catalog,
            &demand,
            BallotView::AllApplicants,
            &SupplyPolicy::default(),
        );
        let families = build_combo_stats(
            &catalog,
            &catalog,
            &demand,
            BallotView::FirstTimerFamilies,
            &SupplyPolicy::default(),
        );

        assert_eq!(all[0].town, "Tengah");
        assert!(all
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
        for stat in all.iter().chain(families.iter()) {
            assert!((0.0..=0.99).contains(&stat.probability));
            assert!((0.0..=0.99).contains(&stat.category_probability));
        }
        let care = families
            .iter()
            .find(|stat| stat.flat_type.contains("Community Care"))
            .expect("community care row present");
        assert_eq!(care.adjusted_supply, 0);
        assert_eq!(care.probability, 0.0);
    }
}
