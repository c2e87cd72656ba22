use super::domain::{DemandRecord, UnitRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid demand CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub fn load_catalog_json<R: Read>(reader: R) -> Result<Vec<UnitRecord>, CatalogLoadError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_catalog_path<P: AsRef<Path>>(path: P) -> Result<Vec<UnitRecord>, CatalogLoadError> {
    let file = std::fs::File::open(path)?;
    load_catalog_json(std::io::BufReader::new(file))
}

pub fn load_demand_json<R: Read>(reader: R) -> Result<Vec<DemandRecord>, CatalogLoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a demand export with a header row. Rows that fail to parse are
/// skipped; an unreadable header fails the whole load.
pub fn load_demand_csv<R: Read>(reader: R) -> Result<Vec<DemandRecord>, CatalogLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.headers()?;

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<DemandRow>().enumerate() {
        match row {
            Ok(row) => records.push(row.into_record()),
            Err(err) => warn!(row = index + 1, error = %err, "skipping malformed demand row"),
        }
    }

    Ok(records)
}

/// Picks the demand reader by file extension; anything other than `.json` is read as CSV.
pub fn load_demand_path<P: AsRef<Path>>(path: P) -> Result<Vec<DemandRecord>, CatalogLoadError> {
    let path = path.as_ref();
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        load_demand_json(file)
    } else {
        load_demand_csv(file)
    }
}

#[derive(Debug, Deserialize)]
struct DemandRow {
    #[serde(default, alias = "Sale Exercise")]
    sale_exercise: String,
    #[serde(alias = "Town")]
    town: String,
    #[serde(alias = "Flat Type")]
    flat_type: String,
    #[serde(default, alias = "Applicants", deserialize_with = "blank_as_zero")]
    applicants: u32,
    #[serde(
        default,
        alias = "First-Timer Families",
        deserialize_with = "blank_as_zero"
    )]
    first_timer_families: u32,
    #[serde(
        default,
        alias = "First-Timer Singles",
        deserialize_with = "blank_as_zero"
    )]
    first_timer_singles: u32,
    #[serde(
        default,
        alias = "Second-Timer Families",
        deserialize_with = "blank_as_zero"
    )]
    second_timer_families: u32,
    #[serde(default, alias = "Seniors", deserialize_with = "blank_as_zero")]
    seniors: u32,
    #[serde(default, alias = "Units Offered", deserialize_with = "blank_as_zero")]
    units_offered: u32,
}

impl DemandRow {
    fn into_record(self) -> DemandRecord {
        DemandRecord {
            sale_exercise: self.sale_exercise,
            town: self.town,
            flat_type: self.flat_type,
            applicants: self.applicants,
            first_timer_families: self.first_timer_families,
            first_timer_singles: self.first_timer_singles,
            second_timer_families: self.second_timer_families,
            seniors: self.seniors,
            units_offered: self.units_offered,
        }
    }
}

fn blank_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value
            .replace(',', "")
            .parse::<u32>()
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::domain::EthnicQuota;

    #[test]
    fn blank_cells_load_as_zero() {
        let csv = "Sale Exercise,Town,Flat Type,Applicants,First-Timer Families,First-Timer Singles,Second-Timer Families,Seniors,Units Offered\n\
2025-02 BTO,Tengah,4-Room,\"1,204\",880,,40,12,300\n";

        let records = load_demand_csv(csv.as_bytes()).expect("csv loads");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].applicants, 1204);
        assert_eq!(records[0].first_timer_families, 880);
        assert_eq!(records[0].first_timer_singles, 0);
        assert_eq!(records[0].units_offered, 300);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = "town,flat_type,applicants\n\
Tengah,4-Room,120\n\
Tengah,5-Room,lots\n";

        let records = load_demand_csv(csv.as_bytes()).expect("csv loads");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].flat_type, "4-Room");
    }

    #[test]
    fn catalog_json_tolerates_missing_fields() {
        let json = r#"[{"town": "Tengah", "flat_type": "4-Room", "price": 420000, "completion": "2028-1-15"}]"#;

        let records = load_catalog_json(json.as_bytes()).expect("catalog loads");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, Some(420000.0));
        assert!(records[0].floor_level.is_none());
        assert!(records[0].completion.is_some());
    }

    #[test]
    fn catalog_reads_quoted_and_float_encoded_numbers() {
        let json = r#"[{
            "price": "420,000",
            "floor_area_sqm": "93.0",
            "price_per_sqm": 4516.1,
            "floor_level": "07",
            "max_floor_level": 16.0,
            "remaining_lease_years": "95",
            "estimated_resale_value": 610000.0,
            "transit": {"station": "Tengah", "walk_minutes": "11", "walk_meters": 850.0},
            "transit_with_light_rail": {"walk_minutes": 4.0, "walk_meters": "320"},
            "ethnic_quota": {"chinese": "4", "malay": 2.0, "indian_others": "yes"}
        }]"#;

        let records = load_catalog_json(json.as_bytes()).expect("catalog loads");
        let unit = &records[0];

        assert_eq!(unit.price, Some(420_000.0));
        assert_eq!(unit.floor_area_sqm, Some(93.0));
        assert_eq!(unit.price_per_sqm, Some(4516.1));
        assert_eq!(unit.floor_level, Some(7));
        assert_eq!(unit.max_floor_level, Some(16));
        assert_eq!(unit.remaining_lease_years, Some(95.0));
        assert_eq!(unit.estimated_resale_value, Some(610_000.0));
        assert_eq!(unit.transit.walk_minutes, Some(11.0));
        assert_eq!(unit.transit.walk_meters, Some(850.0));
        let light = unit
            .transit_with_light_rail
            .as_ref()
            .expect("light rail access present");
        assert_eq!(light.walk_minutes, Some(4.0));
        assert_eq!(light.walk_meters, Some(320.0));
        assert_eq!(unit.ethnic_quota.chinese, 4);
        assert_eq!(unit.ethnic_quota.malay, 2);
        assert_eq!(unit.ethnic_quota.indian_others, 1);
    }

    #[test]
    fn unreadable_numbers_are_withheld_without_rejecting_the_catalog() {
        let json = r##"[
            {
                "unit": "#03-11",
                "price": "TBC",
                "floor_area_sqm": null,
                "price_per_sqm": "",
                "floor_level": 7.5,
                "max_floor_level": "tall",
                "remaining_lease_years": [99],
                "estimated_resale_value": {"low": 1},
                "transit": {"walk_minutes": "a while", "walk_meters": null},
                "ethnic_quota": {"chinese": "open", "malay": null, "indian_others": -2}
            },
            {"unit": "#08-11", "price": 455000, "floor_level": 8}
        ]"##;

        let records = load_catalog_json(json.as_bytes()).expect("catalog still loads");

        assert_eq!(records.len(), 2);
        let messy = &records[0];
        assert_eq!(messy.price, None);
        assert_eq!(messy.floor_area_sqm, None);
        assert_eq!(messy.price_per_sqm, None);
        assert_eq!(messy.floor_level, None);
        assert_eq!(messy.max_floor_level, None);
        assert_eq!(messy.remaining_lease_years, None);
        assert_eq!(messy.estimated_resale_value, None);
        assert_eq!(messy.transit.walk_minutes, None);
        assert_eq!(messy.transit.walk_meters, None);
        assert_eq!(messy.ethnic_quota, EthnicQuota::default());

        assert_eq!(records[1].price, Some(455_000.0));
        assert_eq!(records[1].floor_level, Some(8));
    }
}
