mod config;
mod policy;
mod rules;

pub use config::{ConfigurationError, ThresholdConfig};

use super::domain::{ClinicalStatus, Gate, GateStatus, PatientSnapshot, SnapshotField};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator that applies a validated threshold set to telemetry snapshots.
#[derive(Debug, Clone, Default)]
pub struct CdssEvaluator {
    config: ThresholdConfig,
}

impl CdssEvaluator {
    pub fn new(config: ThresholdConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Run the gate cascade. Invalid input is rejected before any gate runs.
    pub fn evaluate(&self, snapshot: &PatientSnapshot) -> Result<EvaluationResult, ValidationError> {
        rules::validate_snapshot(snapshot)?;
        Ok(run_cascade(snapshot, &self.config))
    }
}

/// One-shot evaluation that validates the threshold set on every call.
pub fn evaluate(
    snapshot: &PatientSnapshot,
    config: &ThresholdConfig,
) -> Result<EvaluationResult, EvaluationError> {
    let evaluator = CdssEvaluator::new(*config)?;
    Ok(evaluator.evaluate(snapshot)?)
}

fn run_cascade(snapshot: &PatientSnapshot, config: &ThresholdConfig) -> EvaluationResult {
    let mut gates = [GateStatus::Pending; 4];
    let mut status = ClinicalStatus::Green;

    for (index, gate) in Gate::ORDER.into_iter().enumerate() {
        if rules::gate_fails(gate, snapshot, config) {
            gates[index] = GateStatus::Fail;
            for later in &mut gates[index + 1..] {
                *later = GateStatus::Skipped;
            }
            status = gate.failure_status();
            break;
        }
        gates[index] = GateStatus::Pass;
    }

    debug!(?status, ?gates, "triage cascade complete");

    let recommendation = policy::recommend(status, snapshot, config);
    let [usage_check, leak_check, efficacy_check, systemic_check] = gates;

    EvaluationResult {
        usage_check,
        leak_check,
        efficacy_check,
        systemic_check,
        status,
        message: recommendation.message,
        recommended_action: recommendation.action,
    }
}

/// Evaluation output: per-gate progress, the verdict, and the attached guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub usage_check: GateStatus,
    pub leak_check: GateStatus,
    pub efficacy_check: GateStatus,
    pub systemic_check: GateStatus,
    pub status: ClinicalStatus,
    pub message: String,
    pub recommended_action: String,
}

impl EvaluationResult {
    pub fn gate_status(&self, gate: Gate) -> GateStatus {
        match gate {
            Gate::Adherence => self.usage_check,
            Gate::Leak => self.leak_check,
            Gate::Efficacy => self.efficacy_check,
            Gate::Systemic => self.systemic_check,
        }
    }

    /// Gate statuses in cascade order.
    pub fn gates(&self) -> [(Gate, GateStatus); 4] {
        Gate::ORDER.map(|gate| (gate, self.gate_status(gate)))
    }

    pub fn failing_gate(&self) -> Option<Gate> {
        Gate::ORDER
            .into_iter()
            .find(|gate| self.gate_status(*gate) == GateStatus::Fail)
    }
}

/// Snapshot rejected before evaluation. Names the offending field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} must be a finite number (found {value})", .field.name())]
    NonFinite { field: SnapshotField, value: f64 },
    #[error("{} must not be negative (found {value})", .field.name())]
    Negative { field: SnapshotField, value: f64 },
    #[error("{} must not exceed {max} (found {value})", .field.name())]
    AboveMaximum {
        field: SnapshotField,
        value: f64,
        max: f64,
    },
}

impl ValidationError {
    pub fn field(&self) -> SnapshotField {
        match self {
            ValidationError::NonFinite { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::AboveMaximum { field, .. } => *field,
        }
    }
}

/// Error raised by the one-shot [`evaluate`] function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
