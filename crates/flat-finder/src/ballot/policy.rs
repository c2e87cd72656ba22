/// Flat-type marker for community-care apartments, which general applicants skip entirely.
pub const COMMUNITY_CARE_MARKER: &str = "Community Care";
/// Flat-type marker for flexible-tenure (short lease) flats.
pub const FLEXI_MARKER: &str = "Flexi";

// Empirically tuned; confirm with product before changing.

/// Share of flexi units a typical buyer would accept.
pub const FLEXI_DESIRABLE_SHARE: f64 = 0.54;
/// Share of all other units a typical buyer would accept.
pub const STANDARD_DESIRABLE_SHARE: f64 = 0.95;
/// Balloting odds are never modelled as certain.
pub const PROBABILITY_CAP: f64 = 0.99;

/// Supply heuristics applied when estimating balloting odds.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyPolicy {
    pub flexi_desirable_share: f64,
    pub standard_desirable_share: f64,
    pub probability_cap: f64,
}

impl Default for SupplyPolicy {
    fn default() -> Self {
        Self {
            flexi_desirable_share: FLEXI_DESIRABLE_SHARE,
            standard_desirable_share: STANDARD_DESIRABLE_SHARE,
            probability_cap: PROBABILITY_CAP,
        }
    }
}

impl SupplyPolicy {
    /// Units of `flat_type` a typical buyer would actually take, out of `raw`.
    pub fn desirable_supply(&self, flat_type: &str, raw: u32) -> u32 {
        if flat_type.contains(COMMUNITY_CARE_MARKER) {
            0
        } else if flat_type.contains(FLEXI_MARKER) {
            (f64::from(raw) * self.flexi_desirable_share).floor() as u32
        } else {
            (f64::from(raw) * self.standard_desirable_share).floor() as u32
        }
    }

    /// Effective cap: a policy may lower it but never raise it past [`PROBABILITY_CAP`].
    pub fn cap(&self) -> f64 {
        self.probability_cap.clamp(0.0, PROBABILITY_CAP)
    }

    /// `supply / applicants`, capped. No applicants means no competition.
    pub fn probability(&self, supply: u32, applicants: u32) -> f64 {
        if applicants > 0 {
            (f64::from(supply) / f64::from(applicants)).min(self.cap())
        } else if supply > 0 {
            self.cap()
        } else {
            0.0
        }
    }
}
