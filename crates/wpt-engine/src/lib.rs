//! wpt-engine: Two-coil inductive power link simulator
//!
//! This crate provides:
//! - Wheeler self-inductance and coaxial mutual inductance models
//! - Coupling coefficient and coupling regime classification
//! - Quality factors, resonant capacitors, efficiency and power figures
//! - Air-gap and frequency sweeps for charting
//!
//! The model is a DC-resistance, air-core approximation for two coaxial coils
//! of identical radius driven by a sinusoid. Every evaluation is a pure
//! function of its input and the [`EngineConfig`].

pub mod coupling;
pub mod electrical;
pub mod engine;
pub mod error;
pub mod inductance;
pub mod input;
pub mod report;
pub mod result;
pub mod sweep;
pub mod units;

pub use coupling::CouplingState;
pub use engine::Engine;
pub use error::{ConfigError, DomainError, EngineError, Stage, ValidationError};
pub use input::SimulationInput;
pub use result::{LoadResult, SimulationResult, Warning};
pub use sweep::{AirGapSweep, FrequencyPoint, FrequencyRange, FrequencySweep, GapRange, SkippedSample, SweepPoint};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use crate::input::{Limits, AIR_GAP_MM, FREQUENCY_KHZ, WIRE_DIAMETER_MM};

/// Evaluate with the default physical constants
pub fn evaluate(input: &SimulationInput) -> Result<SimulationResult, EngineError> {
    Engine::default().evaluate(input)
}

/// Air-gap sweep with the default physical constants
pub fn sweep_air_gap(input: &SimulationInput, range: GapRange, samples: usize) -> Result<AirGapSweep, EngineError> {
    Engine::default().sweep_air_gap(input, range, samples)
}

/// Frequency sweep with the default physical constants
pub fn sweep_frequency(
    input: &SimulationInput,
    range: FrequencyRange,
    samples: usize,
) -> Result<FrequencySweep, EngineError> {
    Engine::default().sweep_frequency(input, range, samples)
}

/// Physical constants and defaults captured by an [`Engine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Vacuum permeability (H/m)
    pub mu_0: f64,
    /// Winding resistivity (Ohm·m), copper by default
    pub copper_resistivity: f64,
    /// Wire diameter used when the request omits one (mm)
    pub default_wire_diameter_mm: f64,
    /// Relative band around k_c classified as critical coupling
    pub critical_tolerance: f64,
    /// Default air-gap sweep interval
    pub gap_range: GapRange,
    /// Default frequency sweep interval
    pub frequency_range: FrequencyRange,
    /// Default number of sweep samples
    pub sweep_samples: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mu_0: 4.0 * PI * 1e-7,
            copper_resistivity: 1.68e-8,
            default_wire_diameter_mm: 1.0,
            critical_tolerance: 0.005, // 0.5%
            gap_range: GapRange::default(),
            frequency_range: FrequencyRange::default(),
            sweep_samples: 50,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject constants no evaluation could use
    pub fn validate(&self) -> Result<(), ValidationError> {
        Limits::new(f64::MIN_POSITIVE, f64::INFINITY).check("mu_0", self.mu_0)?;
        Limits::new(0.0, f64::INFINITY).check("copper_resistivity", self.copper_resistivity)?;
        WIRE_DIAMETER_MM.check("default_wire_diameter_mm", self.default_wire_diameter_mm)?;
        Limits::new(0.0, 1.0).check("critical_tolerance", self.critical_tolerance)?;
        sweep::check_range(
            AIR_GAP_MM,
            "gap_range.start_mm",
            "gap_range.stop_mm",
            self.gap_range.start_mm,
            self.gap_range.stop_mm,
        )?;
        sweep::check_range(
            FREQUENCY_KHZ,
            "frequency_range.start_khz",
            "frequency_range.stop_khz",
            self.frequency_range.start_khz,
            self.frequency_range.stop_khz,
        )?;
        sweep::check_samples(self.sweep_samples)?;
        Ok(())
    }
}
