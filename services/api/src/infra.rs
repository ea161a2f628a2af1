use metrics_exporter_prometheus::PrometheusHandle;
use sleep_cdss::workflows::therapy::{AlertError, AlertPublisher, TriageAlert};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps dispatched alerts in memory so the demo can print them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<TriageAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: TriageAlert) -> Result<(), AlertError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AlertError::Transport("alert buffer poisoned".to_string()))?;
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn drain(&self) -> Vec<TriageAlert> {
        match self.events.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }
}

/// Emits each alert as a structured log event.
#[derive(Default, Clone, Copy)]
pub(crate) struct TracingAlertPublisher;

impl AlertPublisher for TracingAlertPublisher {
    fn publish(&self, alert: TriageAlert) -> Result<(), AlertError> {
        info!(
            template = %alert.template,
            recipient = alert.recipient.label(),
            status = ?alert.status,
            action = alert.details.get("recommended_action").map(String::as_str).unwrap_or_default(),
            "triage alert dispatched"
        );
        Ok(())
    }
}
