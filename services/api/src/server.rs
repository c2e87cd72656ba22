use crate::cli::ServeArgs;
use crate::infra::{AppState, Datasets};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use flat_finder::config::AppConfig;
use flat_finder::error::AppError;
use flat_finder::telemetry::{self, LogSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, LogSink::Stdout)?;

    let datasets = Datasets::load(&config.datasets)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        datasets: Arc::new(datasets),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "flat finder dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
