use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::therapy::alerts::{AlertError, AlertPublisher, TriageAlert};
use crate::workflows::therapy::domain::PatientSnapshot;
use crate::workflows::therapy::evaluation::{CdssEvaluator, ThresholdConfig};
use crate::workflows::therapy::{therapy_router, TherapyTriageService};

pub(super) fn thresholds() -> ThresholdConfig {
    ThresholdConfig::default()
}

pub(super) fn snapshot(usage_hours: f64, leak_lps: f64, ahi: f64, odi: f64) -> PatientSnapshot {
    PatientSnapshot {
        usage_hours,
        leak_lps,
        ahi,
        odi,
        spo2: 96.0,
    }
}

pub(super) fn evaluator() -> CdssEvaluator {
    CdssEvaluator::new(thresholds()).expect("default thresholds are valid")
}

pub(super) fn build_service() -> (TherapyTriageService<MemoryAlerts>, Arc<MemoryAlerts>) {
    let alerts = Arc::new(MemoryAlerts::default());
    let service =
        TherapyTriageService::new(alerts.clone(), thresholds()).expect("service builds");
    (service, alerts)
}

pub(super) fn router_with_service(service: TherapyTriageService<MemoryAlerts>) -> axum::Router {
    therapy_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<TriageAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<TriageAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: TriageAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl AlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: TriageAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("pager gateway offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
