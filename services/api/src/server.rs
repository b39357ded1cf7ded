use crate::cli::ServeArgs;
use crate::infra::{scorecard_engine, AppState};
use crate::routes::with_methodology_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use civic_engine::config::AppConfig;
use civic_engine::error::AppError;
use civic_engine::telemetry;
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

    telemetry::init(&config.telemetry)?;

    // The dataset is validated before the listener binds; a bad dataset never serves.
    let engine = scorecard_engine(&config.dataset)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policies = engine.store().len();
    let app = with_methodology_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, policies, "civic engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
