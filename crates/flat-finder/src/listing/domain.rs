use super::fields;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which walking-distance fields a record should be read through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    /// Heavy-rail stations only.
    #[default]
    RailOnly,
    /// Light-rail stations count as transit; falls back to rail-only fields
    /// when a record has no light-rail figure.
    WithLightRail,
}

impl TransitMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RailOnly => "Rail only",
            Self::WithLightRail => "Rail + light rail",
        }
    }

    pub(crate) fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rail" | "rail_only" | "mrt" => Some(Self::RailOnly),
            "light_rail" | "with_light_rail" | "lrt" => Some(Self::WithLightRail),
            _ => None,
        }
    }
}

/// Nearest-station figures for one transit mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitAccess {
    pub station: Option<String>,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub walk_minutes: Option<f64>,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub walk_meters: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityKind {
    PrimarySchool,
    Mall,
    HawkerCentre,
    Park,
}

impl AmenityKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PrimarySchool,
            Self::Mall,
            Self::HawkerCentre,
            Self::Park,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PrimarySchool => "Primary School",
            Self::Mall => "Mall",
            Self::HawkerCentre => "Hawker Centre",
            Self::Park => "Park",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub name: String,
    #[serde(default, deserialize_with = "fields::lenient_f64")]
    pub walk_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyAmenities {
    pub primary_schools: Vec<Amenity>,
    pub malls: Vec<Amenity>,
    pub hawker_centres: Vec<Amenity>,
    pub parks: Vec<Amenity>,
}

impl NearbyAmenities {
    pub fn of_kind(&self, kind: AmenityKind) -> &[Amenity] {
        match kind {
            AmenityKind::PrimarySchool => &self.primary_schools,
            AmenityKind::Mall => &self.malls,
            AmenityKind::HawkerCentre => &self.hawker_centres,
            AmenityKind::Park => &self.parks,
        }
    }
}

/// Remaining ethnic-integration quota per group. Exports carry these as counts,
/// numeric strings or booleans; all are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthnicQuota {
    #[serde(deserialize_with = "fields::count_or_flag")]
    pub chinese: u32,
    #[serde(deserialize_with = "fields::count_or_flag")]
    pub malay: u32,
    #[serde(deserialize_with = "fields::count_or_flag")]
    pub indian_others: u32,
}

/// Completion field: either the literal "completed" sentinel or a `YYYY-M-D` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionDate {
    Completed,
    Expected(NaiveDate),
    Unparsed(String),
}

impl CompletionDate {
    pub const COMPLETED_SENTINEL: &'static str = "completed";

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(Self::COMPLETED_SENTINEL) {
            return Self::Completed;
        }

        parse_loose_date(trimmed)
            .map(Self::Expected)
            .unwrap_or_else(|| Self::Unparsed(trimmed.to_string()))
    }
}

/// Accepts `YYYY-M-D` with or without zero padding.
fn parse_loose_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-').map(str::trim);
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

impl Serialize for CompletionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Completed => serializer.serialize_str(Self::COMPLETED_SENTINEL),
            Self::Expected(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            Self::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for CompletionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One sellable unit in a sale exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRecord {
    pub sale_exercise: String,
    pub town: String,
    pub project: String,
    pub block: String,
    pub unit: String,
    pub flat_type: String,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub floor_area_sqm: Option<f64>,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub price_per_sqm: Option<f64>,
    #[serde(deserialize_with = "fields::lenient_u32")]
    pub floor_level: Option<u32>,
    #[serde(deserialize_with = "fields::lenient_u32")]
    pub max_floor_level: Option<u32>,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub remaining_lease_years: Option<f64>,
    #[serde(deserialize_with = "fields::lenient_f64")]
    pub estimated_resale_value: Option<f64>,
    pub transit: TransitAccess,
    /// Figures when light-rail stations are included; absent fields fall back to `transit`.
    pub transit_with_light_rail: Option<TransitAccess>,
    pub amenities: NearbyAmenities,
    pub ethnic_quota: EthnicQuota,
    pub repurchase: Option<bool>,
    pub completion: Option<CompletionDate>,
}

impl UnitRecord {
    pub fn key(&self) -> UnitKey {
        UnitKey {
            project: self.project.clone(),
            block: self.block.clone(),
            unit: self.unit.clone(),
        }
    }

    /// Price per square metre, derived from price and area when the export omits it.
    pub fn price_per_area(&self) -> Option<f64> {
        self.price_per_sqm.or_else(|| match (self.price, self.floor_area_sqm) {
            (Some(price), Some(area)) if area > 0.0 => Some(price / area),
            _ => None,
        })
    }

    pub fn station(&self, mode: TransitMode) -> Option<&str> {
        self.secondary(mode)
            .and_then(|access| access.station.as_deref())
            .or(self.transit.station.as_deref())
    }

    pub fn walk_minutes(&self, mode: TransitMode) -> Option<f64> {
        self.secondary(mode)
            .and_then(|access| access.walk_minutes)
            .or(self.transit.walk_minutes)
    }

    pub fn walk_meters(&self, mode: TransitMode) -> Option<f64> {
        self.secondary(mode)
            .and_then(|access| access.walk_meters)
            .or(self.transit.walk_meters)
    }

    fn secondary(&self, mode: TransitMode) -> Option<&TransitAccess> {
        match mode {
            TransitMode::RailOnly => None,
            TransitMode::WithLightRail => self.transit_with_light_rail.as_ref(),
        }
    }
}

/// Traces derived values back to the unit they were computed from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitKey {
    pub project: String,
    pub block: String,
    pub unit: String,
}

/// Applicant statistics for one (town, flat type) category of a sale exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandRecord {
    pub sale_exercise: String,
    pub town: String,
    pub flat_type: String,
    pub applicants: u32,
    pub first_timer_families: u32,
    pub first_timer_singles: u32,
    pub second_timer_families: u32,
    pub seniors: u32,
    pub units_offered: u32,
}
