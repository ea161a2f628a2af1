use super::super::domain::{Gate, PatientSnapshot, SnapshotField};
use super::config::ThresholdConfig;
use super::ValidationError;

pub(crate) fn validate_snapshot(snapshot: &PatientSnapshot) -> Result<(), ValidationError> {
    for field in SnapshotField::ALL {
        let value = snapshot.value(field);
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { field, value });
        }
        if let Some(max) = field.upper_bound() {
            if value > max {
                return Err(ValidationError::AboveMaximum { field, value, max });
            }
        }
    }
    Ok(())
}

/// Failure predicate for one gate. Boundary handling differs per gate:
/// usage passes at the minimum, leak and AHI fail at their limits, and the
/// systemic check needs both strict inequalities.
pub(crate) fn gate_fails(gate: Gate, snapshot: &PatientSnapshot, config: &ThresholdConfig) -> bool {
    match gate {
        Gate::Adherence => snapshot.usage_hours < config.usage_min_hours,
        Gate::Leak => snapshot.leak_lps >= config.leak_max_lps,
        Gate::Efficacy => snapshot.ahi >= config.ahi_target,
        Gate::Systemic => {
            snapshot.odi > config.ahi_target
                && (snapshot.odi - snapshot.ahi) > config.discrepancy_gap
        }
    }
}
