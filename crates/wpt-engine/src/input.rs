//! User-facing simulation parameters and their valid ranges

use serde::{Deserialize, Serialize};
use crate::error::ValidationError;

/// Inclusive range of accepted values for one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        // NaN fails both comparisons
        value >= self.min && value <= self.max
    }

    /// Reject `value` with a [`ValidationError`] naming `field` when out of range
    pub fn check(&self, field: &'static str, value: f64) -> Result<f64, ValidationError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(ValidationError::new(field, value, self.min, self.max))
        }
    }
}

pub const AIR_GAP_MM: Limits = Limits::new(1.0, 50.0);
pub const FREQUENCY_KHZ: Limits = Limits::new(10.0, 1000.0);
pub const REQUIRED_POWER_W: Limits = Limits::new(1.0, 100.0);
pub const INPUT_VOLTAGE_V: Limits = Limits::new(5.0, 48.0);
pub const COIL_RADIUS_MM: Limits = Limits::new(10.0, 100.0);
pub const TURNS: Limits = Limits::new(5.0, 50.0);
pub const LOAD_RESISTANCE_OHM: Limits = Limits::new(1.0, 100.0);
pub const WIRE_DIAMETER_MM: Limits = Limits::new(0.1, 5.0);

/// Parameters of one evaluation request, in UI units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    /// Axial distance between the coils (mm)
    pub air_gap_mm: f64,
    /// Drive frequency (kHz)
    pub frequency_khz: f64,
    /// Power to deliver to the load (W)
    pub required_power_w: f64,
    /// Supply voltage (V)
    pub input_voltage_v: f64,
    /// Radius shared by both coils (mm)
    pub coil_radius_mm: f64,
    pub primary_turns: u32,
    pub secondary_turns: u32,
    /// Load resistance on the secondary (Ω)
    pub load_resistance_ohm: f64,
    /// Wire diameter (mm); the engine default applies when absent
    pub wire_diameter_mm: Option<f64>,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            air_gap_mm: 5.0,
            frequency_khz: 200.0,
            required_power_w: 10.0,
            input_voltage_v: 24.0,
            coil_radius_mm: 25.0,
            primary_turns: 20,
            secondary_turns: 20,
            load_resistance_ohm: 10.0,
            wire_diameter_mm: None,
        }
    }
}

impl SimulationInput {
    /// Check every field against its range, reporting the first offender
    pub fn validate(&self) -> Result<(), ValidationError> {
        AIR_GAP_MM.check("air_gap_mm", self.air_gap_mm)?;
        FREQUENCY_KHZ.check("frequency_khz", self.frequency_khz)?;
        REQUIRED_POWER_W.check("required_power_w", self.required_power_w)?;
        INPUT_VOLTAGE_V.check("input_voltage_v", self.input_voltage_v)?;
        COIL_RADIUS_MM.check("coil_radius_mm", self.coil_radius_mm)?;
        TURNS.check("primary_turns", self.primary_turns as f64)?;
        TURNS.check("secondary_turns", self.secondary_turns as f64)?;
        LOAD_RESISTANCE_OHM.check("load_resistance_ohm", self.load_resistance_ohm)?;
        if let Some(d) = self.wire_diameter_mm {
            WIRE_DIAMETER_MM.check("wire_diameter_mm", d)?;
        }
        Ok(())
    }

    pub fn with_air_gap(&self, air_gap_mm: f64) -> Self {
        Self { air_gap_mm, ..*self }
    }

    pub fn with_frequency(&self, frequency_khz: f64) -> Self {
        Self { frequency_khz, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationInput::default().validate().is_ok());
    }

    #[test]
    fn test_gap_bounds_are_inclusive() {
        let input = SimulationInput::default();
        assert!(input.with_air_gap(1.0).validate().is_ok());
        assert!(input.with_air_gap(50.0).validate().is_ok());

        let err = input.with_air_gap(0.0).validate().unwrap_err();
        assert_eq!(err.field, "air_gap_mm");
        assert_eq!((err.min, err.max), (1.0, 50.0));
        assert!(input.with_air_gap(51.0).validate().is_err());
    }

    #[test]
    fn test_nan_is_rejected_not_clamped() {
        let input = SimulationInput { load_resistance_ohm: f64::NAN, ..Default::default() };
        assert_eq!(input.validate().unwrap_err().field, "load_resistance_ohm");
    }

    #[test]
    fn test_turns_and_wire_checked() {
        let input = SimulationInput { secondary_turns: 4, ..Default::default() };
        assert_eq!(input.validate().unwrap_err().field, "secondary_turns");

        let input = SimulationInput { wire_diameter_mm: Some(0.0), ..Default::default() };
        assert_eq!(input.validate().unwrap_err().field, "wire_diameter_mm");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let input: SimulationInput = serde_json::from_str(r#"{"air_gap_mm": 12.5, "primary_turns": 30}"#).unwrap();
        assert_eq!(input.air_gap_mm, 12.5);
        assert_eq!(input.primary_turns, 30);
        assert_eq!(input.secondary_turns, 20);
        assert_eq!(input.wire_diameter_mm, None);
    }
}
