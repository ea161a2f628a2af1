use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::ClinicalStatus;

/// Trait describing outbound escalation hooks (e.g., nursing pager or EHR inbox adapters).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: TriageAlert) -> Result<(), AlertError>;
}

/// Care-team role that owns the follow-up for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRecipient {
    CareCoordinator,
    Nursing,
    Physician,
    Specialist,
}

impl AlertRecipient {
    /// Green verdicts need no escalation.
    pub const fn for_status(status: ClinicalStatus) -> Option<Self> {
        match status {
            ClinicalStatus::Green => None,
            ClinicalStatus::YellowAdherence => Some(Self::CareCoordinator),
            ClinicalStatus::YellowTechnical => Some(Self::Nursing),
            ClinicalStatus::RedInefficacy => Some(Self::Physician),
            ClinicalStatus::RedDiscrepancy => Some(Self::Specialist),
        }
    }

    pub const fn template(self) -> &'static str {
        match self {
            Self::CareCoordinator => "adherence_support",
            Self::Nursing => "mask_fit_check",
            Self::Physician => "pressure_retitration",
            Self::Specialist => "specialist_review",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CareCoordinator => "Care Coordinator",
            Self::Nursing => "Nursing",
            Self::Physician => "Physician",
            Self::Specialist => "Specialist",
        }
    }
}

/// Escalation payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageAlert {
    pub template: String,
    pub status: ClinicalStatus,
    pub recipient: AlertRecipient,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
