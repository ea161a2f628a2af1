//! Home sleep-therapy triage: a fixed cascade of threshold gates that turns a
//! nightly telemetry snapshot into a clinical verdict and an intervention.
//!
//! Gates run in order (adherence, mask leak, AHI efficacy, ODI cross-check)
//! and the first failure decides the verdict; every later gate is skipped.

pub mod alerts;
pub mod domain;
pub(crate) mod evaluation;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{AlertError, AlertPublisher, AlertRecipient, TriageAlert};
pub use domain::{
    ClinicalStatus, Gate, GateStatus, PatientSnapshot, Severity, SnapshotField, SnapshotUpdate,
};
pub use evaluation::{
    evaluate, CdssEvaluator, ConfigurationError, EvaluationError, EvaluationResult,
    ThresholdConfig, ValidationError,
};
pub use report::{GateCriterionEntry, GateProgressEntry, ThresholdSheet, TriageReport};
pub use router::therapy_router;
pub use service::{TherapyTriageService, TriageServiceError};
