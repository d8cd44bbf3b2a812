//! Self and mutual inductance of single-layer air-core coils
//!
//! Both coils are modeled as coaxial solenoids of identical radius. The mutual
//! inductance formula assumes that geometry and is not checked at runtime.

use std::f64::consts::PI;
use crate::error::{finite, DomainError, Stage};

/// Calculate inductance of a single-layer solenoid coil (Wheeler formula)
/// Coil length is `turns * wire_diameter` (close wound).
/// L = mu0 * N^2 * A * k_nag / l, with Nagaoka correction k_nag = 1 / (1 + 0.9 r/l)
/// Returns inductance in Henries
pub fn self_inductance(mu_0: f64, turns: f64, radius_m: f64, wire_diameter_m: f64) -> Result<f64, DomainError> {
    let length_m = turns * wire_diameter_m;
    if !length_m.is_finite() || length_m <= 0.0 {
        return Err(DomainError::new(Stage::SelfInductance, "coil_length", length_m));
    }

    let area = PI * radius_m * radius_m;
    let nagaoka = 1.0 / (1.0 + 0.9 * radius_m / length_m);

    finite(Stage::SelfInductance, "self_inductance", mu_0 * turns * turns * area * nagaoka / length_m)
}

/// Calculate mutual inductance between two coaxial coils of equal radius (Neumann approximation)
/// M = mu0 * pi * N1 * N2 * r^4 / (2 * (r^2 + d^2)^(3/2))
/// Tends to mu0 * pi * N1 * N2 * r / 2 as d -> 0
/// Returns M in Henries
pub fn mutual_inductance(mu_0: f64, n1: f64, n2: f64, radius_m: f64, gap_m: f64) -> Result<f64, DomainError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(DomainError::new(Stage::MutualInductance, "coil_radius", radius_m));
    }

    let r_sq = radius_m * radius_m;
    let denominator = 2.0 * (r_sq + gap_m * gap_m).powf(1.5);

    finite(Stage::MutualInductance, "mutual_inductance", mu_0 * PI * n1 * n2 * r_sq * r_sq / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MU0: f64 = 4.0 * PI * 1e-7;

    #[test]
    fn test_wheeler_reference_coil() {
        // r = 50mm, 20 turns of 1mm wire: mu0*N^2*pi*r^2 / (l + 0.9r) = 60.74 uH
        let l = self_inductance(MU0, 20.0, 0.05, 1e-3).unwrap();
        assert!((l * 1e6 - 60.74).abs() < 0.01, "L = {} uH", l * 1e6);
    }

    #[test]
    fn test_inductance_scales_with_turns() {
        let l10 = self_inductance(MU0, 10.0, 0.025, 1e-3).unwrap();
        let l40 = self_inductance(MU0, 40.0, 0.025, 1e-3).unwrap();
        assert!(l40 > l10);
    }

    #[test]
    fn test_zero_length_coil_is_domain_error() {
        let err = self_inductance(MU0, 20.0, 0.05, 0.0).unwrap_err();
        assert_eq!(err.stage, Stage::SelfInductance);
        assert_eq!(err.quantity, "coil_length");
    }

    #[test]
    fn test_mutual_reference_value() {
        // r = 50mm, d = 10mm, 20 x 20 turns: 37.22 uH
        let m = mutual_inductance(MU0, 20.0, 20.0, 0.05, 0.01).unwrap();
        assert!((m * 1e6 - 37.22).abs() < 0.01, "M = {} uH", m * 1e6);
    }

    #[test]
    fn test_mutual_decreases_with_gap() {
        let mut last = f64::INFINITY;
        for gap_mm in 1..=50 {
            let m = mutual_inductance(MU0, 20.0, 20.0, 0.025, gap_mm as f64 * 1e-3).unwrap();
            assert!(m < last);
            last = m;
        }
    }

    #[test]
    fn test_mutual_zero_gap_limit() {
        let m = mutual_inductance(MU0, 10.0, 15.0, 0.03, 0.0).unwrap();
        let limit = MU0 * PI * 10.0 * 15.0 * 0.03 / 2.0;
        assert!((m - limit).abs() / limit < 1e-12);
    }
}
