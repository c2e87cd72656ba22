//! Filter state, slider bounds, the record predicate engine, and presets.

pub mod facets;
pub mod predicates;
pub mod presets;
pub mod ranges;
pub mod state;

pub use facets::{collect_facets, FacetOptions};
pub use predicates::{filter_units, unit_matches};
pub use presets::PresetProfile;
pub use ranges::{compute_ranges, RangeBounds, ValueBounds, DEFAULT_ROI_BOUNDS};
pub use state::{EthnicGroup, FilterState, NumericDimension, NumericRange, PresetPatch};
