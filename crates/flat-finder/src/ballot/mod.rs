//! Demand aggregation and balloting-odds estimation per (town, flat type).

pub mod aggregate;
pub mod policy;
pub mod probability;

pub use aggregate::{aggregate_demand, count_supply, CategoryKey, DemandTotals};
pub use policy::{
    SupplyPolicy, COMMUNITY_CARE_MARKER, FLEXI_DESIRABLE_SHARE, FLEXI_MARKER, PROBABILITY_CAP,
    STANDARD_DESIRABLE_SHARE,
};
pub use probability::{build_combo_stats, BallotView, ComboStat};
