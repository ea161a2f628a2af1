//! End-to-end scenarios for the therapy triage cascade through the public facade.
//!
//! Each scenario mirrors a dashboard case a clinician would walk through when
//! reviewing a patient's nightly CPAP averages.

use std::sync::{Arc, Mutex};

use sleep_cdss::workflows::therapy::{
    evaluate, therapy_router, AlertError, AlertPublisher, ClinicalStatus, EvaluationError,
    GateStatus, PatientSnapshot, SnapshotField, SnapshotUpdate, TherapyTriageService,
    ThresholdConfig, TriageAlert,
};
use tower::ServiceExt;

fn patient(usage_hours: f64, leak_lps: f64, ahi: f64, odi: f64) -> PatientSnapshot {
    PatientSnapshot {
        usage_hours,
        leak_lps,
        ahi,
        odi,
        spo2: 96.0,
    }
}

#[derive(Default)]
struct RecordingAlerts {
    events: Mutex<Vec<TriageAlert>>,
}

impl AlertPublisher for RecordingAlerts {
    fn publish(&self, alert: TriageAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

#[test]
fn documented_boundary_cases_resolve_to_expected_verdicts() {
    let config = ThresholdConfig::default();
    let cases = [
        (patient(3.9, 0.1, 4.0, 3.0), ClinicalStatus::YellowAdherence),
        (patient(4.0, 0.4, 4.0, 3.0), ClinicalStatus::YellowTechnical),
        (patient(6.5, 0.1, 10.0, 3.0), ClinicalStatus::RedInefficacy),
        (patient(6.5, 0.1, 4.0, 11.0), ClinicalStatus::RedDiscrepancy),
        (patient(6.5, 0.1, 4.0, 9.0), ClinicalStatus::Green),
    ];

    for (snapshot, expected) in cases {
        let result = evaluate(&snapshot, &config).expect("valid snapshot evaluates");
        assert_eq!(result.status, expected, "snapshot {snapshot:?}");
        assert_eq!(result.failing_gate(), expected.gate());
    }
}

#[test]
fn negative_leak_produces_validation_error_only() {
    let outcome = evaluate(&patient(6.5, -0.1, 4.0, 3.0), &ThresholdConfig::default());

    match outcome {
        Err(EvaluationError::Validation(err)) => {
            assert_eq!(err.field(), SnapshotField::LeakLps);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn data_source_updates_drive_fresh_evaluations() {
    let config = ThresholdConfig::default();
    let mut snapshot = PatientSnapshot::baseline();

    let stable = evaluate(&snapshot, &config).expect("baseline evaluates");
    assert_eq!(stable.status, ClinicalStatus::Green);

    snapshot = snapshot.merged(&SnapshotUpdate {
        leak_lps: Some(0.55),
        ..SnapshotUpdate::default()
    });
    let leaking = evaluate(&snapshot, &config).expect("leaking snapshot evaluates");
    assert_eq!(leaking.status, ClinicalStatus::YellowTechnical);
    assert_eq!(leaking.efficacy_check, GateStatus::Skipped);

    snapshot = snapshot.with_field(SnapshotField::LeakLps, 0.1);
    let recovered = evaluate(&snapshot, &config).expect("recovered snapshot evaluates");
    assert_eq!(recovered, stable);
}

#[tokio::test]
async fn http_facade_escalates_inefficacy_to_physician() {
    let alerts = Arc::new(RecordingAlerts::default());
    let service = TherapyTriageService::new(alerts.clone(), ThresholdConfig::default())
        .expect("service builds");
    let router = therapy_router(Arc::new(service));

    let body = serde_json::to_vec(&patient(7.0, 0.2, 22.0, 25.0)).expect("snapshot serializes");
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/therapy/evaluate")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
    assert_eq!(
        payload.get("status").and_then(serde_json::Value::as_str),
        Some("RED_INEFFICACY")
    );

    let events = alerts.events.lock().expect("alert mutex poisoned");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "pressure_retitration");
}
