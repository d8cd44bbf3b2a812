//! Electrical model of a series-series compensated two-coil link
//!
//! Winding resistance is the DC value (no skin or proximity effect). Both coils
//! are tuned to the drive frequency by their series capacitors.

use std::f64::consts::PI;
use nalgebra::{Complex, Matrix2, Vector2};
use crate::error::{finite, DomainError, Stage};

/// DC resistance of the winding: R = rho * (2 pi r N) / (pi (d/2)^2)
pub fn wire_resistance(resistivity: f64, turns: f64, radius_m: f64, wire_diameter_m: f64) -> Result<f64, DomainError> {
    let wire_length = 2.0 * PI * radius_m * turns;
    let wire_area = PI * (wire_diameter_m / 2.0).powi(2);
    finite(Stage::Electrical, "wire_resistance", resistivity * wire_length / wire_area)
}

/// Q = omega L / R
pub fn quality_factor(frequency_hz: f64, inductance: f64, resistance: f64) -> Result<f64, DomainError> {
    finite(Stage::Electrical, "quality_factor", 2.0 * PI * frequency_hz * inductance / resistance)
}

/// Capacitance needed for series resonance: C = 1 / (4 pi^2 f^2 L)
pub fn resonant_capacitance(frequency_hz: f64, inductance: f64) -> Result<f64, DomainError> {
    let omega = 2.0 * PI * frequency_hz;
    finite(Stage::Electrical, "resonant_capacitance", 1.0 / (omega * omega * inductance))
}

/// Maximum link efficiency under optimal load matching
/// eta_max = k^2 Q1 Q2 / (1 + sqrt(1 + k^2 Q1 Q2))^2
pub fn max_efficiency(k: f64, q1: f64, q2: f64) -> f64 {
    let figure_of_merit = k * k * q1 * q2;
    if figure_of_merit <= 0.0 {
        return 0.0;
    }
    figure_of_merit / (1.0 + (1.0 + figure_of_merit).sqrt()).powi(2)
}

/// Load resistance at which the actual-load efficiency reaches eta_max: R2 * sqrt(1 + k^2 Q1 Q2)
pub fn optimal_load(r2: f64, k: f64, q1: f64, q2: f64) -> f64 {
    r2 * (1.0 + k * k * q1 * q2).sqrt()
}

/// Power and current figures for a given efficiency with `required_power_w` at the load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBudget {
    pub power_input_w: f64,
    pub power_output_w: f64,
    pub power_loss_w: f64,
    pub primary_current_a: f64,
    pub secondary_current_a: f64,
}

impl PowerBudget {
    /// P_in = P_out / eta, I1 = P_in / V_in, I2 = sqrt(P_out / R_L)
    pub fn from_efficiency(
        efficiency: f64,
        required_power_w: f64,
        input_voltage_v: f64,
        load_resistance_ohm: f64,
    ) -> Result<Self, DomainError> {
        let power_input_w = finite(Stage::Electrical, "power_input", required_power_w / efficiency)?;
        Ok(Self {
            power_input_w,
            power_output_w: required_power_w,
            power_loss_w: power_input_w - required_power_w,
            primary_current_a: finite(Stage::Electrical, "primary_current", power_input_w / input_voltage_v)?,
            secondary_current_a: finite(Stage::Electrical, "secondary_current", (required_power_w / load_resistance_ohm).sqrt())?,
        })
    }
}

/// Lumped two-loop circuit: source, C1, L1, R1 coupled through M to L2, C2, R2, R_L
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkCircuit {
    pub frequency_hz: f64,
    pub l1: f64,
    pub l2: f64,
    pub m: f64,
    pub c1: f64,
    pub c2: f64,
    pub r1: f64,
    pub r2: f64,
    pub load_resistance: f64,
}

/// Operating point with the actual load, scaled so the load receives the required power
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOperatingPoint {
    pub efficiency: f64,
    pub power_input_w: f64,
    pub power_loss_w: f64,
    pub primary_current_a: f64,
    pub secondary_current_a: f64,
    /// RMS source voltage needed to deliver the required power
    pub drive_voltage_v: f64,
}

impl LinkCircuit {
    /// Loop impedance matrix Z such that Z [I1, I2] = [V, 0]
    fn impedance_matrix(&self) -> Matrix2<Complex<f64>> {
        let omega = 2.0 * PI * self.frequency_hz;
        let x1 = omega * self.l1 - 1.0 / (omega * self.c1);
        let x2 = omega * self.l2 - 1.0 / (omega * self.c2);
        let xm = Complex::new(0.0, -omega * self.m);

        Matrix2::new(
            Complex::new(self.r1, x1), xm,
            xm, Complex::new(self.r2 + self.load_resistance, x2),
        )
    }

    /// Solve the loop equations for a 1 V drive and scale to `required_power_w` at the load
    pub fn solve(&self, required_power_w: f64) -> Result<LoadOperatingPoint, DomainError> {
        let z = self.impedance_matrix();
        let drive = Vector2::new(Complex::new(1.0, 0.0), Complex::new(0.0, 0.0));
        let currents = z
            .lu()
            .solve(&drive)
            .ok_or_else(|| DomainError::new(Stage::LoadSolve, "loop_impedance", z.determinant().norm()))?;
        let (i1, i2) = (currents[0], currents[1]);

        // Real power drawn from the 1 V source and delivered to the load
        let unit_input = i1.re;
        let unit_load = i2.norm_sqr() * self.load_resistance;
        let efficiency = finite(Stage::LoadSolve, "load_efficiency", unit_load / unit_input)?;

        let scale = finite(Stage::LoadSolve, "drive_scale", (required_power_w / unit_load).sqrt())?;
        let primary_current_a = i1.norm() * scale;
        let secondary_current_a = i2.norm() * scale;

        Ok(LoadOperatingPoint {
            efficiency,
            power_input_w: unit_input * scale * scale,
            power_loss_w: primary_current_a.powi(2) * self.r1 + secondary_current_a.powi(2) * self.r2,
            primary_current_a,
            secondary_current_a,
            drive_voltage_v: scale,
        })
    }
}
