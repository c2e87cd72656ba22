use chrono::{Local, NaiveDate};
use clap::Args;
use flat_finder::ballot::{BallotView, SupplyPolicy};
use flat_finder::config::TelemetryConfig;
use flat_finder::error::AppError;
use flat_finder::listing::{load_catalog_path, load_demand_path, CatalogLoadError, TransitMode};
use flat_finder::search::{FilterState, PresetProfile};
use flat_finder::telemetry::{self, LogSink};
use flat_finder::{bounds_for_exercise, Dashboard, DashboardOptions};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Unit catalog exported as JSON
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Demand statistics (CSV, or JSON when the extension is .json)
    #[arg(long)]
    pub(crate) demand: Option<PathBuf>,
    /// Saved filter state (JSON). Defaults to an unrestricted filter.
    #[arg(long)]
    pub(crate) filter: Option<PathBuf>,
    /// Sale exercise to scope to; overrides the one in --filter
    #[arg(long)]
    pub(crate) exercise: Option<String>,
    /// Preset to merge into the filter (best_value, near_transit, family_sized, high_floor, long_lease)
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Read station and walking fields from the light-rail columns
    #[arg(long)]
    pub(crate) light_rail: bool,
    /// Compute odds against first-timer family applicants only
    #[arg(long)]
    pub(crate) first_timer_families: bool,
    /// Reporting date used for completion buckets (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Log filter for diagnostics written to stderr
    #[arg(long, default_value = "warn")]
    pub(crate) log_level: String,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    telemetry::init(
        &TelemetryConfig {
            log_level: args.log_level.clone(),
        },
        LogSink::Stderr,
    )?;

    let catalog = load_catalog_path(&args.catalog)?;
    let demand = match &args.demand {
        Some(path) => load_demand_path(path)?,
        None => Vec::new(),
    };

    let options = DashboardOptions {
        transit_mode: if args.light_rail {
            TransitMode::WithLightRail
        } else {
            TransitMode::RailOnly
        },
        ballot_view: if args.first_timer_families {
            BallotView::FirstTimerFamilies
        } else {
            BallotView::AllApplicants
        },
        policy: SupplyPolicy::default(),
    };

    let mut filter = match &args.filter {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader::<_, FilterState>(reader).map_err(CatalogLoadError::from)?
        }
        None => FilterState::unrestricted(),
    };
    if args.exercise.is_some() {
        filter = filter.with_sale_exercise(args.exercise.clone());
    }
    if let Some(name) = &args.preset {
        let preset =
            PresetProfile::from_key(name).ok_or_else(|| AppError::UnknownPreset(name.clone()))?;
        let bounds = bounds_for_exercise(
            &catalog,
            filter.sale_exercise.as_deref(),
            options.transit_mode,
        );
        filter = filter.merge(preset.patch(&bounds));
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let dashboard = Dashboard::build(&catalog, &demand, &filter, &options, today);
    info!(
        units = dashboard.units.len(),
        combos = dashboard.ballot.len(),
        "dashboard report built"
    );

    let json = serde_json::to_string_pretty(&dashboard).map_err(CatalogLoadError::from)?;
    println!("{json}");
    Ok(())
}
