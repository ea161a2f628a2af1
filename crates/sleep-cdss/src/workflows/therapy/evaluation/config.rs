use serde::{Deserialize, Serialize};

/// Threshold set driving the triage cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub usage_min_hours: f64,
    pub leak_max_lps: f64,
    /// Also serves as the ODI floor of the systemic gate.
    pub ahi_target: f64,
    pub discrepancy_gap: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            usage_min_hours: 4.0,
            leak_max_lps: 0.4,
            ahi_target: 10.0,
            discrepancy_gap: 5.0,
        }
    }
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (threshold, value) in [
            ("usage_min_hours", self.usage_min_hours),
            ("leak_max_lps", self.leak_max_lps),
            ("ahi_target", self.ahi_target),
            ("discrepancy_gap", self.discrepancy_gap),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { threshold, value });
            }
            if value < 0.0 {
                return Err(ConfigurationError::Negative { threshold, value });
            }
        }
        Ok(())
    }
}

/// Raised when an evaluator is built from an unusable threshold set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("threshold {threshold} must be a finite number (found {value})")]
    NonFinite { threshold: &'static str, value: f64 },
    #[error("threshold {threshold} must not be negative (found {value})")]
    Negative { threshold: &'static str, value: f64 },
}
