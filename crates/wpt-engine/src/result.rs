//! Response contract in display units

use serde::Serialize;
use crate::coupling::CouplingState;
use crate::electrical::{LoadOperatingPoint, PowerBudget};
use crate::units::{farads_to_nanofarads, henries_to_microhenries, ohms_to_milliohms, ratio_to_percent};

const CLAMP_RATIONALE: &str =
    "coaxial inductance approximations overestimate M when the gap is small relative to the radius; efficiency uses k = 1";

/// Non-fatal conditions attached to a result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Raw k exceeded 1 and was clamped for the efficiency formula only
    CouplingClamped { raw_k: f64, rationale: &'static str },
    /// Actual-load drive voltage is above the supply voltage
    SupplyExceeded { drive_voltage_v: f64, input_voltage_v: f64 },
}

/// Every quantity computed by one evaluation, in SI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSolution {
    pub l1: f64,
    pub l2: f64,
    pub m: f64,
    pub c1: f64,
    pub c2: f64,
    pub r1: f64,
    pub r2: f64,
    pub q1: f64,
    pub q2: f64,
    pub k: f64,
    pub k_effective: f64,
    pub k_exceeds_unity: bool,
    pub k_critical: f64,
    pub coupling_state: CouplingState,
    pub max_efficiency: f64,
    pub optimal_load_ohm: f64,
    pub budget: PowerBudget,
    pub load: LoadOperatingPoint,
    pub input_voltage_v: f64,
}

/// Operating point with the user's load resistance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadResult {
    pub efficiency_pct: f64,
    #[serde(rename = "power_input_W")]
    pub power_input_w: f64,
    #[serde(rename = "power_loss_W")]
    pub power_loss_w: f64,
    #[serde(rename = "primary_current_A")]
    pub primary_current_a: f64,
    #[serde(rename = "secondary_current_A")]
    pub secondary_current_a: f64,
    #[serde(rename = "drive_voltage_V")]
    pub drive_voltage_v: f64,
    pub exceeds_supply: bool,
}

/// Evaluation result
///
/// `efficiency_pct` and the top-level power and current figures assume optimal
/// load matching: they are an upper bound. `load` holds the same figures for
/// the load resistance actually requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub efficiency_pct: f64,
    pub coupling_k: f64,
    pub k_effective: f64,
    pub k_exceeds_unity: bool,
    pub k_critical: f64,
    pub coupling_state: CouplingState,
    #[serde(rename = "primary_current_A")]
    pub primary_current_a: f64,
    #[serde(rename = "secondary_current_A")]
    pub secondary_current_a: f64,
    #[serde(rename = "power_input_W")]
    pub power_input_w: f64,
    #[serde(rename = "power_output_W")]
    pub power_output_w: f64,
    #[serde(rename = "power_loss_W")]
    pub power_loss_w: f64,
    #[serde(rename = "L1_uH")]
    pub l1_uh: f64,
    #[serde(rename = "L2_uH")]
    pub l2_uh: f64,
    #[serde(rename = "M_uH")]
    pub m_uh: f64,
    #[serde(rename = "C1_nF")]
    pub c1_nf: f64,
    #[serde(rename = "C2_nF")]
    pub c2_nf: f64,
    #[serde(rename = "R1_mOhm")]
    pub r1_mohm: f64,
    #[serde(rename = "R2_mOhm")]
    pub r2_mohm: f64,
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    pub optimal_load_ohm: f64,
    pub load: LoadResult,
    pub warnings: Vec<Warning>,
}

impl From<&LinkSolution> for SimulationResult {
    fn from(s: &LinkSolution) -> Self {
        let exceeds_supply = s.load.drive_voltage_v > s.input_voltage_v;

        let mut warnings = Vec::new();
        if s.k_exceeds_unity {
            warnings.push(Warning::CouplingClamped { raw_k: s.k, rationale: CLAMP_RATIONALE });
        }
        if exceeds_supply {
            warnings.push(Warning::SupplyExceeded {
                drive_voltage_v: s.load.drive_voltage_v,
                input_voltage_v: s.input_voltage_v,
            });
        }

        Self {
            efficiency_pct: ratio_to_percent(s.max_efficiency),
            coupling_k: s.k,
            k_effective: s.k_effective,
            k_exceeds_unity: s.k_exceeds_unity,
            k_critical: s.k_critical,
            coupling_state: s.coupling_state,
            primary_current_a: s.budget.primary_current_a,
            secondary_current_a: s.budget.secondary_current_a,
            power_input_w: s.budget.power_input_w,
            power_output_w: s.budget.power_output_w,
            power_loss_w: s.budget.power_loss_w,
            l1_uh: henries_to_microhenries(s.l1),
            l2_uh: henries_to_microhenries(s.l2),
            m_uh: henries_to_microhenries(s.m),
            c1_nf: farads_to_nanofarads(s.c1),
            c2_nf: farads_to_nanofarads(s.c2),
            r1_mohm: ohms_to_milliohms(s.r1),
            r2_mohm: ohms_to_milliohms(s.r2),
            q1: s.q1,
            q2: s.q2,
            optimal_load_ohm: s.optimal_load_ohm,
            load: LoadResult {
                efficiency_pct: ratio_to_percent(s.load.efficiency),
                power_input_w: s.load.power_input_w,
                power_loss_w: s.load.power_loss_w,
                primary_current_a: s.load.primary_current_a,
                secondary_current_a: s.load.secondary_current_a,
                drive_voltage_v: s.load.drive_voltage_v,
                exceeds_supply,
            },
            warnings,
        }
    }
}
