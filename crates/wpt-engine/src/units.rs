//! Unit conversion between UI scale values and SI base units

use crate::error::{finite, DomainError, Stage};
use crate::input::SimulationInput;

const MILLI: f64 = 1e-3;
const KILO: f64 = 1e3;

/// Millimeters to meters, rejecting non-finite input
pub fn mm_to_m(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    finite(Stage::UnitConversion, quantity, value).map(|v| v * MILLI)
}

/// Kilohertz to hertz, rejecting non-finite input
pub fn khz_to_hz(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    finite(Stage::UnitConversion, quantity, value).map(|v| v * KILO)
}

/// Simulation parameters in SI base units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiParameters {
    pub air_gap_m: f64,
    pub frequency_hz: f64,
    pub required_power_w: f64,
    pub input_voltage_v: f64,
    pub coil_radius_m: f64,
    pub primary_turns: f64,
    pub secondary_turns: f64,
    pub load_resistance_ohm: f64,
    pub wire_diameter_m: f64,
}

impl SiParameters {
    /// Normalize a request, filling the wire diameter from `default_wire_diameter_mm`
    pub fn from_input(input: &SimulationInput, default_wire_diameter_mm: f64) -> Result<Self, DomainError> {
        let wire_mm = input.wire_diameter_mm.unwrap_or(default_wire_diameter_mm);
        Ok(Self {
            air_gap_m: mm_to_m("air_gap_mm", input.air_gap_mm)?,
            frequency_hz: khz_to_hz("frequency_khz", input.frequency_khz)?,
            required_power_w: finite(Stage::UnitConversion, "required_power_w", input.required_power_w)?,
            input_voltage_v: finite(Stage::UnitConversion, "input_voltage_v", input.input_voltage_v)?,
            coil_radius_m: mm_to_m("coil_radius_mm", input.coil_radius_mm)?,
            primary_turns: input.primary_turns as f64,
            secondary_turns: input.secondary_turns as f64,
            load_resistance_ohm: finite(Stage::UnitConversion, "load_resistance_ohm", input.load_resistance_ohm)?,
            wire_diameter_m: mm_to_m("wire_diameter_mm", wire_mm)?,
        })
    }
}

pub fn henries_to_microhenries(value: f64) -> f64 {
    value * 1e6
}

pub fn farads_to_nanofarads(value: f64) -> f64 {
    value * 1e9
}

pub fn ohms_to_milliohms(value: f64) -> f64 {
    value * 1e3
}

pub fn ratio_to_percent(value: f64) -> f64 {
    value * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_inputs_to_si() {
        assert!((mm_to_m("air_gap_mm", 10.0).unwrap() - 0.01).abs() < 1e-15);
        assert_eq!(khz_to_hz("frequency_khz", 10.0).unwrap(), 10_000.0);
        assert!((mm_to_m("coil_radius_mm", 100.0).unwrap() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_display_conversions() {
        assert!((henries_to_microhenries(60.74e-6) - 60.74).abs() < 1e-9);
        assert!((farads_to_nanofarads(10.4e-9) - 10.4).abs() < 1e-9);
        assert!((ohms_to_milliohms(0.1344) - 134.4).abs() < 1e-9);
        assert_eq!(ratio_to_percent(0.5), 50.0);
    }

    #[test]
    fn test_non_finite_input_fails() {
        let err = mm_to_m("coil_radius_mm", f64::NAN).unwrap_err();
        assert_eq!(err.stage, Stage::UnitConversion);
        assert_eq!(err.quantity, "coil_radius_mm");
        assert!(khz_to_hz("frequency_khz", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_si_parameters_fill_default_wire() {
        let si = SiParameters::from_input(&SimulationInput::default(), 1.0).unwrap();
        assert!((si.wire_diameter_m - 1e-3).abs() < 1e-15);
        assert!((si.coil_radius_m - 0.025).abs() < 1e-15);
        assert_eq!(si.frequency_hz, 200_000.0);

        let input = SimulationInput { wire_diameter_mm: Some(0.5), ..Default::default() };
        let si = SiParameters::from_input(&input, 1.0).unwrap();
        assert!((si.wire_diameter_m - 5e-4).abs() < 1e-15);
    }
}
