//! Coupling coefficient and coupling regime classification

use serde::{Deserialize, Serialize};
use crate::error::{finite, DomainError, Stage};

/// Coupling regime relative to the critical coupling k_c = 1/sqrt(Q1*Q2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouplingState {
    /// k within tolerance of k_c: power transfer peaks
    Critical,
    /// k below k_c
    Under,
    /// k above k_c: the resonance splits into two peaks
    Over,
}

/// Coupling coefficient as computed and as used by the efficiency formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coupling {
    /// Raw M / sqrt(L1 * L2), never clamped
    pub k: f64,
    /// min(k, 1), fed into the efficiency formula
    pub k_effective: f64,
    /// Raw k exceeded 1: the closed-form inductance models broke down
    pub exceeds_unity: bool,
}

/// k = M / sqrt(L1 * L2)
pub fn coupling_coefficient(l1: f64, l2: f64, m: f64) -> Result<Coupling, DomainError> {
    let k = finite(Stage::Coupling, "coupling_k", m / (l1 * l2).sqrt())?;
    if k < 0.0 {
        return Err(DomainError::new(Stage::Coupling, "coupling_k", k));
    }

    let exceeds_unity = k > 1.0;
    if exceeds_unity {
        tracing::warn!("Coupling k = {:.4} exceeds 1, clamping to 1 for efficiency", k);
    }

    Ok(Coupling {
        k,
        k_effective: k.min(1.0),
        exceeds_unity,
    })
}

/// k_c = 1 / sqrt(Q1 * Q2)
pub fn critical_coupling(q1: f64, q2: f64) -> Result<f64, DomainError> {
    finite(Stage::Coupling, "k_critical", 1.0 / (q1 * q2).sqrt())
}

/// Classify `k` against `k_critical`; within `tolerance` (relative) counts as critical
pub fn classify(k: f64, k_critical: f64, tolerance: f64) -> CouplingState {
    if (k - k_critical).abs() <= tolerance * k_critical {
        CouplingState::Critical
    } else if k > k_critical {
        CouplingState::Over
    } else {
        CouplingState::Under
    }
}
