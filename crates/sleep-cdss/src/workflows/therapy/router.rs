use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::alerts::AlertPublisher;
use super::domain::PatientSnapshot;
use super::report::{ThresholdSheet, TriageReport};
use super::service::TherapyTriageService;
use crate::error::AppError;

/// Router builder exposing the triage endpoints.
pub fn therapy_router<A>(service: Arc<TherapyTriageService<A>>) -> Router
where
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/therapy/evaluate", post(evaluate_handler::<A>))
        .route("/api/v1/therapy/thresholds", get(thresholds_handler::<A>))
        .with_state(service)
}

/// Rejected snapshots surface as 422 with the offending field, alert outages as 502.
pub(crate) async fn evaluate_handler<A>(
    State(service): State<Arc<TherapyTriageService<A>>>,
    Json(snapshot): Json<PatientSnapshot>,
) -> Result<Json<TriageReport>, AppError>
where
    A: AlertPublisher + 'static,
{
    let report = service.report(snapshot)?;
    Ok(Json(report))
}

pub(crate) async fn thresholds_handler<A>(
    State(service): State<Arc<TherapyTriageService<A>>>,
) -> Json<ThresholdSheet>
where
    A: AlertPublisher + 'static,
{
    Json(service.threshold_sheet())
}
