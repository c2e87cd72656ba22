use chrono::NaiveDate;
use flat_finder::ballot::BallotView;
use flat_finder::config::DatasetConfig;
use flat_finder::error::AppError;
use flat_finder::listing::{load_catalog_path, load_demand_path, DemandRecord, TransitMode, UnitRecord};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) datasets: Arc<Datasets>,
}

/// Catalog and demand statistics held for the lifetime of the process.
#[derive(Debug, Default)]
pub(crate) struct Datasets {
    pub(crate) catalog: Vec<UnitRecord>,
    pub(crate) demand: Vec<DemandRecord>,
    pub(crate) transit_mode: TransitMode,
    pub(crate) ballot_view: BallotView,
}

impl Datasets {
    pub(crate) fn load(config: &DatasetConfig) -> Result<Self, AppError> {
        let catalog = match &config.catalog_path {
            Some(path) => load_catalog_path(path)?,
            None => {
                warn!("APP_CATALOG_PATH not set; serving an empty catalog");
                Vec::new()
            }
        };
        let demand = match &config.demand_path {
            Some(path) => load_demand_path(path)?,
            None => Vec::new(),
        };

        info!(
            units = catalog.len(),
            demand_rows = demand.len(),
            "datasets loaded"
        );

        Ok(Self {
            catalog,
            demand,
            transit_mode: config.transit_mode,
            ballot_view: config.ballot_view,
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
