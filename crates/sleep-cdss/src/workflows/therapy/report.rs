use serde::Serialize;

use super::domain::{ClinicalStatus, Gate, GateStatus, PatientSnapshot, Severity};
use super::evaluation::{EvaluationResult, ThresholdConfig};

#[derive(Debug, Clone, Serialize)]
pub struct GateProgressEntry {
    pub gate: Gate,
    pub gate_label: &'static str,
    pub description: &'static str,
    pub criterion: String,
    pub status: GateStatus,
    pub status_label: &'static str,
}

impl GateProgressEntry {
    fn new(gate: Gate, status: GateStatus, config: &ThresholdConfig) -> Self {
        Self {
            gate,
            gate_label: gate.label(),
            description: gate.description(),
            criterion: gate.criterion(config),
            status,
            status_label: status.label(),
        }
    }
}

/// Presentation view of an evaluation. Message and action are passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    pub snapshot: PatientSnapshot,
    pub status: ClinicalStatus,
    pub status_label: &'static str,
    pub severity: Severity,
    pub message: String,
    pub recommended_action: String,
    pub gates: Vec<GateProgressEntry>,
}

impl TriageReport {
    pub fn new(
        snapshot: PatientSnapshot,
        result: &EvaluationResult,
        config: &ThresholdConfig,
    ) -> Self {
        let gates = result
            .gates()
            .into_iter()
            .map(|(gate, status)| GateProgressEntry::new(gate, status, config))
            .collect();

        Self {
            snapshot,
            status: result.status,
            status_label: result.status.label(),
            severity: result.status.severity(),
            message: result.message.clone(),
            recommended_action: result.recommended_action.clone(),
            gates,
        }
    }
}

/// Active thresholds together with the criterion of every gate, in cascade order.
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdSheet {
    pub thresholds: ThresholdConfig,
    pub gates: Vec<GateCriterionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GateCriterionEntry {
    pub gate: Gate,
    pub gate_label: &'static str,
    pub criterion: String,
    pub failure_status: ClinicalStatus,
}

impl ThresholdSheet {
    pub fn new(config: &ThresholdConfig) -> Self {
        let gates = Gate::ORDER
            .into_iter()
            .map(|gate| GateCriterionEntry {
                gate,
                gate_label: gate.label(),
                criterion: gate.criterion(config),
                failure_status: gate.failure_status(),
            })
            .collect();

        Self {
            thresholds: *config,
            gates,
        }
    }
}
