use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::alerts::{AlertError, AlertPublisher, AlertRecipient, TriageAlert};
use super::domain::PatientSnapshot;
use super::evaluation::{
    CdssEvaluator, ConfigurationError, EvaluationResult, ThresholdConfig, ValidationError,
};
use super::report::{ThresholdSheet, TriageReport};

/// Service composing the evaluator with the escalation hook. Keeps no snapshot history.
pub struct TherapyTriageService<A> {
    evaluator: Arc<CdssEvaluator>,
    alerts: Arc<A>,
}

impl<A> TherapyTriageService<A>
where
    A: AlertPublisher + 'static,
{
    pub fn new(alerts: Arc<A>, config: ThresholdConfig) -> Result<Self, ConfigurationError> {
        let evaluator = Arc::new(CdssEvaluator::new(config)?);
        Ok(Self { evaluator, alerts })
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        self.evaluator.config()
    }

    pub fn threshold_sheet(&self) -> ThresholdSheet {
        ThresholdSheet::new(self.thresholds())
    }

    /// Evaluate a snapshot and escalate any non-green verdict.
    pub fn assess(
        &self,
        snapshot: &PatientSnapshot,
    ) -> Result<EvaluationResult, TriageServiceError> {
        let result = self.evaluator.evaluate(snapshot).map_err(|err| {
            warn!(field = err.field().name(), %err, "rejected telemetry snapshot");
            err
        })?;

        info!(status = ?result.status, gate = ?result.failing_gate(), "triage verdict");

        if let Some(recipient) = AlertRecipient::for_status(result.status) {
            self.alerts.publish(build_alert(recipient, snapshot, &result))?;
        }

        Ok(result)
    }

    /// Assess and wrap the outcome in the presentation view.
    pub fn report(&self, snapshot: PatientSnapshot) -> Result<TriageReport, TriageServiceError> {
        let result = self.assess(&snapshot)?;
        Ok(TriageReport::new(snapshot, &result, self.thresholds()))
    }
}

fn build_alert(
    recipient: AlertRecipient,
    snapshot: &PatientSnapshot,
    result: &EvaluationResult,
) -> TriageAlert {
    let mut details = BTreeMap::new();
    details.insert("message".to_string(), result.message.clone());
    details.insert(
        "recommended_action".to_string(),
        result.recommended_action.clone(),
    );
    details.insert("usage_hours".to_string(), snapshot.usage_hours.to_string());
    details.insert("leak_lps".to_string(), snapshot.leak_lps.to_string());
    details.insert("ahi".to_string(), snapshot.ahi.to_string());
    details.insert("odi".to_string(), snapshot.odi.to_string());

    TriageAlert {
        template: recipient.template().to_string(),
        status: result.status,
        recipient,
        details,
    }
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
