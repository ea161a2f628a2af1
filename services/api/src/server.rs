use crate::cli::ServeArgs;
use crate::infra::{AppState, TracingAlertPublisher};
use crate::routes::with_therapy_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use sleep_cdss::config::AppConfig;
use sleep_cdss::error::AppError;
use sleep_cdss::telemetry;
use sleep_cdss::workflows::therapy::TherapyTriageService;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let alerts = Arc::new(TracingAlertPublisher);
    let triage_service = Arc::new(TherapyTriageService::new(alerts, config.thresholds)?);

    let app = with_therapy_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, thresholds = ?config.thresholds, %addr, "therapy triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
