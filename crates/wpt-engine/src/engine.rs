//! Evaluation pipeline: units -> inductances -> coupling -> electrical -> result

use tracing::debug;
use crate::EngineConfig;
use crate::coupling::{classify, coupling_coefficient, critical_coupling};
use crate::electrical::{
    max_efficiency, optimal_load, quality_factor, resonant_capacitance, wire_resistance, LinkCircuit,
    PowerBudget,
};
use crate::error::{DomainError, EngineError};
use crate::inductance::{mutual_inductance, self_inductance};
use crate::input::SimulationInput;
use crate::result::{LinkSolution, SimulationResult};
use crate::sweep::{self, AirGapSweep, FrequencyRange, FrequencySweep, GapRange};
use crate::units::SiParameters;

/// Stateless evaluator bound to one set of physical constants
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate `input` and compute the full result
    pub fn evaluate(&self, input: &SimulationInput) -> Result<SimulationResult, EngineError> {
        input.validate()?;
        let solution = self.solve(input)?;
        Ok(SimulationResult::from(&solution))
    }

    /// Efficiency and coupling against air gap, all other inputs held fixed
    pub fn sweep_air_gap(
        &self,
        input: &SimulationInput,
        range: GapRange,
        samples: usize,
    ) -> Result<AirGapSweep, EngineError> {
        sweep::air_gap(self, input, range, samples)
    }

    /// Efficiency against drive frequency (log spaced), all other inputs held fixed
    pub fn sweep_frequency(
        &self,
        input: &SimulationInput,
        range: FrequencyRange,
        samples: usize,
    ) -> Result<FrequencySweep, EngineError> {
        sweep::frequency(self, input, range, samples)
    }

    /// Run the pipeline on an already validated input
    pub(crate) fn solve(&self, input: &SimulationInput) -> Result<LinkSolution, DomainError> {
        let cfg = &self.config;
        let si = SiParameters::from_input(input, cfg.default_wire_diameter_mm)?;

        let l1 = self_inductance(cfg.mu_0, si.primary_turns, si.coil_radius_m, si.wire_diameter_m)?;
        let l2 = self_inductance(cfg.mu_0, si.secondary_turns, si.coil_radius_m, si.wire_diameter_m)?;
        let m = mutual_inductance(cfg.mu_0, si.primary_turns, si.secondary_turns, si.coil_radius_m, si.air_gap_m)?;
        let coupling = coupling_coefficient(l1, l2, m)?;

        let r1 = wire_resistance(cfg.copper_resistivity, si.primary_turns, si.coil_radius_m, si.wire_diameter_m)?;
        let r2 = wire_resistance(cfg.copper_resistivity, si.secondary_turns, si.coil_radius_m, si.wire_diameter_m)?;
        let q1 = quality_factor(si.frequency_hz, l1, r1)?;
        let q2 = quality_factor(si.frequency_hz, l2, r2)?;
        let c1 = resonant_capacitance(si.frequency_hz, l1)?;
        let c2 = resonant_capacitance(si.frequency_hz, l2)?;

        let k_critical = critical_coupling(q1, q2)?;
        let coupling_state = classify(coupling.k, k_critical, cfg.critical_tolerance);

        let eta = max_efficiency(coupling.k_effective, q1, q2);
        let budget = PowerBudget::from_efficiency(
            eta,
            si.required_power_w,
            si.input_voltage_v,
            si.load_resistance_ohm,
        )?;

        // Breakdown geometries use the clamped coupling in the load solve too
        let m_effective = if coupling.exceeds_unity { (l1 * l2).sqrt() } else { m };
        let load = LinkCircuit {
            frequency_hz: si.frequency_hz,
            l1,
            l2,
            m: m_effective,
            c1,
            c2,
            r1,
            r2,
            load_resistance: si.load_resistance_ohm,
        }
        .solve(si.required_power_w)?;

        debug!(
            "gap={:.1}mm f={:.0}Hz k={:.4} kc={:.5} {:?} eta_max={:.4} eta_load={:.4}",
            input.air_gap_mm, si.frequency_hz, coupling.k, k_critical, coupling_state, eta, load.efficiency
        );

        Ok(LinkSolution {
            l1,
            l2,
            m,
            c1,
            c2,
            r1,
            r2,
            q1,
            q2,
            k: coupling.k,
            k_effective: coupling.k_effective,
            k_exceeds_unity: coupling.exceeds_unity,
            k_critical,
            coupling_state,
            max_efficiency: eta,
            optimal_load_ohm: optimal_load(r2, coupling.k_effective, q1, q2),
            budget,
            load,
            input_voltage_v: si.input_voltage_v,
        })
    }
}
