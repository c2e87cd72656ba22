use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use flat_finder::ballot::{BallotView, SupplyPolicy};
use flat_finder::error::AppError;
use flat_finder::listing::{available_exercises, TransitMode};
use flat_finder::search::{FilterState, PresetProfile, RangeBounds};
use flat_finder::{bounds_for_exercise, Dashboard, DashboardOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DashboardRequest {
    pub(crate) filter: FilterState,
    pub(crate) transit_mode: Option<TransitMode>,
    pub(crate) ballot_view: Option<BallotView>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BoundsRequest {
    pub(crate) sale_exercise: Option<String>,
    pub(crate) transit_mode: Option<TransitMode>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BoundsResponse {
    pub(crate) bounds: RangeBounds,
    pub(crate) default_filter: FilterState,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PresetRequest {
    pub(crate) filter: FilterState,
    pub(crate) transit_mode: Option<TransitMode>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PresetResponse {
    pub(crate) preset: &'static str,
    pub(crate) preset_label: &'static str,
    pub(crate) filter: FilterState,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/exercises", get(exercises_endpoint))
        .route("/api/v1/bounds", post(bounds_endpoint))
        .route("/api/v1/presets/:name", post(preset_endpoint))
        .route("/api/v1/dashboard", post(dashboard_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn exercises_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    let exercises = available_exercises(&state.datasets.catalog);
    Json(json!({ "sale_exercises": exercises }))
}

pub(crate) async fn bounds_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BoundsRequest>,
) -> Json<BoundsResponse> {
    let mode = payload
        .transit_mode
        .unwrap_or(state.datasets.transit_mode);
    let bounds = bounds_for_exercise(
        &state.datasets.catalog,
        payload.sale_exercise.as_deref(),
        mode,
    );
    let default_filter =
        FilterState::with_defaults(&bounds).with_sale_exercise(payload.sale_exercise);

    Json(BoundsResponse {
        bounds,
        default_filter,
    })
}

pub(crate) async fn preset_endpoint(
    Extension(state): Extension<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<PresetRequest>,
) -> Result<Json<PresetResponse>, AppError> {
    let preset = PresetProfile::from_key(&name).ok_or(AppError::UnknownPreset(name))?;
    let mode = payload
        .transit_mode
        .unwrap_or(state.datasets.transit_mode);
    let bounds = bounds_for_exercise(
        &state.datasets.catalog,
        payload.filter.sale_exercise.as_deref(),
        mode,
    );

    Ok(Json(PresetResponse {
        preset: preset.key(),
        preset_label: preset.label(),
        filter: payload.filter.merge(preset.patch(&bounds)),
    }))
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Json<Dashboard> {
    let DashboardRequest {
        filter,
        transit_mode,
        ballot_view,
        today,
    } = payload;

    let options = DashboardOptions {
        transit_mode: transit_mode.unwrap_or(state.datasets.transit_mode),
        ballot_view: ballot_view.unwrap_or(state.datasets.ballot_view),
        policy: SupplyPolicy::default(),
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    Json(Dashboard::build(
        &state.datasets.catalog,
        &state.datasets.demand,
        &filter,
        &options,
        today,
    ))
}
