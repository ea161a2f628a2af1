use serde::{Deserialize, Serialize};

use super::evaluation::ThresholdConfig;

/// Nightly telemetry averages for a single patient, as supplied by the data source.
///
/// `spo2` travels with the snapshot for context but no gate reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    #[serde(alias = "usageHours")]
    pub usage_hours: f64,
    #[serde(alias = "leakLPS", alias = "leakLps")]
    pub leak_lps: f64,
    pub ahi: f64,
    pub odi: f64,
    pub spo2: f64,
}

impl PatientSnapshot {
    /// Stable patient case used as the starting point for interactive sessions.
    pub const fn baseline() -> Self {
        Self {
            usage_hours: 6.5,
            leak_lps: 0.1,
            ahi: 4.0,
            odi: 3.0,
            spo2: 96.0,
        }
    }

    pub const fn value(&self, field: SnapshotField) -> f64 {
        match field {
            SnapshotField::UsageHours => self.usage_hours,
            SnapshotField::LeakLps => self.leak_lps,
            SnapshotField::Ahi => self.ahi,
            SnapshotField::Odi => self.odi,
            SnapshotField::Spo2 => self.spo2,
        }
    }

    /// Copy of the snapshot with a single field replaced.
    pub fn with_field(mut self, field: SnapshotField, value: f64) -> Self {
        match field {
            SnapshotField::UsageHours => self.usage_hours = value,
            SnapshotField::LeakLps => self.leak_lps = value,
            SnapshotField::Ahi => self.ahi = value,
            SnapshotField::Odi => self.odi = value,
            SnapshotField::Spo2 => self.spo2 = value,
        }
        self
    }

    /// Copy of the snapshot with every field present in `update` replaced.
    pub fn merged(&self, update: &SnapshotUpdate) -> Self {
        update
            .values()
            .fold(*self, |snapshot, (field, value)| snapshot.with_field(field, value))
    }
}

impl Default for PatientSnapshot {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Partial change to a snapshot. Merged by the data source before evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotUpdate {
    #[serde(alias = "usageHours")]
    pub usage_hours: Option<f64>,
    #[serde(alias = "leakLPS", alias = "leakLps")]
    pub leak_lps: Option<f64>,
    pub ahi: Option<f64>,
    pub odi: Option<f64>,
    pub spo2: Option<f64>,
}

impl SnapshotUpdate {
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }

    fn values(&self) -> impl Iterator<Item = (SnapshotField, f64)> {
        [
            (SnapshotField::UsageHours, self.usage_hours),
            (SnapshotField::LeakLps, self.leak_lps),
            (SnapshotField::Ahi, self.ahi),
            (SnapshotField::Odi, self.odi),
            (SnapshotField::Spo2, self.spo2),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
    }
}

/// Measurement carried by a [`PatientSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotField {
    UsageHours,
    LeakLps,
    Ahi,
    Odi,
    Spo2,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 5] = [
        SnapshotField::UsageHours,
        SnapshotField::LeakLps,
        SnapshotField::Ahi,
        SnapshotField::Odi,
        SnapshotField::Spo2,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SnapshotField::UsageHours => "usage_hours",
            SnapshotField::LeakLps => "leak_lps",
            SnapshotField::Ahi => "ahi",
            SnapshotField::Odi => "odi",
            SnapshotField::Spo2 => "spo2",
        }
    }

    /// Upper end of the physical domain, where one exists.
    pub const fn upper_bound(self) -> Option<f64> {
        match self {
            SnapshotField::UsageHours => Some(24.0),
            SnapshotField::Spo2 => Some(100.0),
            SnapshotField::LeakLps | SnapshotField::Ahi | SnapshotField::Odi => None,
        }
    }
}

/// One ordered threshold check of the triage cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    Adherence,
    Leak,
    Efficacy,
    Systemic,
}

impl Gate {
    /// Cascade order. A failure skips every gate after it.
    pub const ORDER: [Gate; 4] = [Gate::Adherence, Gate::Leak, Gate::Efficacy, Gate::Systemic];

    pub const fn label(self) -> &'static str {
        match self {
            Gate::Adherence => "Adherence Check",
            Gate::Leak => "Technical Check (Mask Leak)",
            Gate::Efficacy => "Clinical Check (AHI)",
            Gate::Systemic => "Systemic Validation (ODI)",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Gate::Adherence => "Minimum nightly usage required for therapeutic effect.",
            Gate::Leak => "Reliability of the flow signal.",
            Gate::Efficacy => "Residual respiratory events (apneas/hypopneas).",
            Gate::Systemic => "Oximetry cross-check for events the flow sensor misses.",
        }
    }

    /// Pass criterion rendered against the active thresholds.
    pub fn criterion(self, config: &ThresholdConfig) -> String {
        match self {
            Gate::Adherence => format!("Target: >= {}h", config.usage_min_hours),
            Gate::Leak => format!("Limit: < {} L/s", config.leak_max_lps),
            Gate::Efficacy => format!("Target: < {} ev/h", config.ahi_target),
            Gate::Systemic => format!(
                "Flag: ODI > {} and ODI - AHI > {}",
                config.ahi_target, config.discrepancy_gap
            ),
        }
    }

    /// Verdict produced when this gate is the first to fail.
    pub const fn failure_status(self) -> ClinicalStatus {
        match self {
            Gate::Adherence => ClinicalStatus::YellowAdherence,
            Gate::Leak => ClinicalStatus::YellowTechnical,
            Gate::Efficacy => ClinicalStatus::RedInefficacy,
            Gate::Systemic => ClinicalStatus::RedDiscrepancy,
        }
    }
}

/// Progress of a single gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    #[default]
    Pending,
    Pass,
    Fail,
    Skipped,
}

impl GateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            GateStatus::Pending => "Pending",
            GateStatus::Pass => "Pass",
            GateStatus::Fail => "Fail",
            GateStatus::Skipped => "Skipped",
        }
    }
}

/// Triage verdict. Identifies the single gate that decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClinicalStatus {
    Green,
    YellowAdherence,
    YellowTechnical,
    RedInefficacy,
    RedDiscrepancy,
}

impl ClinicalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ClinicalStatus::Green => "STABLE (Green)",
            ClinicalStatus::YellowAdherence => "ALERT: ADHERENCE (Yellow)",
            ClinicalStatus::YellowTechnical => "ALERT: LEAK/TECHNICAL (Yellow)",
            ClinicalStatus::RedInefficacy => "ALARM: INEFFICACY (Red)",
            ClinicalStatus::RedDiscrepancy => "ALARM: DISCREPANCY (Red)",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            ClinicalStatus::Green => Severity::Green,
            ClinicalStatus::YellowAdherence | ClinicalStatus::YellowTechnical => Severity::Yellow,
            ClinicalStatus::RedInefficacy | ClinicalStatus::RedDiscrepancy => Severity::Red,
        }
    }

    /// Gate whose failure produces this verdict; `None` for green.
    pub const fn gate(self) -> Option<Gate> {
        match self {
            ClinicalStatus::Green => None,
            ClinicalStatus::YellowAdherence => Some(Gate::Adherence),
            ClinicalStatus::YellowTechnical => Some(Gate::Leak),
            ClinicalStatus::RedInefficacy => Some(Gate::Efficacy),
            ClinicalStatus::RedDiscrepancy => Some(Gate::Systemic),
        }
    }
}

/// Colour tier used by presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Green,
    Yellow,
    Red,
}
