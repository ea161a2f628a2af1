use super::super::domain::{ClinicalStatus, PatientSnapshot};
use super::config::ThresholdConfig;

/// Message and intervention attached to a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recommendation {
    pub message: String,
    pub action: String,
}

pub(crate) fn recommend(
    status: ClinicalStatus,
    snapshot: &PatientSnapshot,
    config: &ThresholdConfig,
) -> Recommendation {
    let (message, action) = match status {
        ClinicalStatus::YellowAdherence => (
            format!(
                "Usage ({:.1}h) is below {}h threshold.",
                snapshot.usage_hours, config.usage_min_hours
            ),
            "Intervention: motivational support. Review mask comfort.",
        ),
        ClinicalStatus::YellowTechnical => (
            format!(
                "High mask leak ({} L/s). Data unreliable.",
                snapshot.leak_lps
            ),
            "Intervention: nursing alert. Check mask fit and positioning.",
        ),
        ClinicalStatus::RedInefficacy => (
            format!("Residual AHI ({}) is too high.", snapshot.ahi),
            "Intervention: medical alert. Request remote re-titration (pressure adjustment).",
        ),
        ClinicalStatus::RedDiscrepancy => (
            "Low AHI but high ODI. Potential sensor error or complex pathology.".to_string(),
            "Intervention: specialist alert. Suspected central apnea or sensor malfunction.",
        ),
        ClinicalStatus::Green => (
            "Therapy effective. Parameters within normal range.".to_string(),
            "No intervention required. Continue monitoring.",
        ),
    };

    Recommendation {
        message,
        action: action.to_string(),
    }
}
