//! Structured failures for a single evaluation

use serde::Serialize;
use thiserror::Error;

/// Input value outside its documented range
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{field} = {value} is outside the valid range [{min}, {max}]")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl ValidationError {
    pub fn new(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self { field, value, min, max }
    }
}

/// Pipeline stage in which a computation went degenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    UnitConversion,
    SelfInductance,
    MutualInductance,
    Coupling,
    Electrical,
    LoadSolve,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::UnitConversion => "unit conversion",
            Stage::SelfInductance => "self-inductance",
            Stage::MutualInductance => "mutual inductance",
            Stage::Coupling => "coupling",
            Stage::Electrical => "electrical model",
            Stage::LoadSolve => "load solve",
        };
        f.write_str(name)
    }
}

/// Physically degenerate computation (division by zero, non-finite result)
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{stage}: {quantity} is degenerate (got {value})")]
pub struct DomainError {
    pub stage: Stage,
    pub quantity: &'static str,
    pub value: f64,
}

impl DomainError {
    pub fn new(stage: Stage, quantity: &'static str, value: f64) -> Self {
        Self { stage, quantity, value }
    }
}

/// Returns `value` if it is finite, otherwise a [`DomainError`] naming it
pub(crate) fn finite(stage: Stage, quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::new(stage, quantity, value))
    }
}

/// Top-level error for engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Failure loading an [`EngineConfig`](crate::EngineConfig) from JSON
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_passes_through() {
        assert_eq!(finite(Stage::Electrical, "q1", 3.5), Ok(3.5));
    }

    #[test]
    fn test_finite_rejects_nan_and_inf() {
        let err = finite(Stage::SelfInductance, "l1", f64::INFINITY).unwrap_err();
        assert_eq!(err.stage, Stage::SelfInductance);
        assert_eq!(err.quantity, "l1");
        assert!(finite(Stage::Coupling, "k", f64::NAN).is_err());
    }

    #[test]
    fn test_validation_error_serializes_field() {
        let err = ValidationError::new("air_gap_mm", 51.0, 1.0, 50.0);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "air_gap_mm");
        assert_eq!(json["max"], 50.0);
    }
}
