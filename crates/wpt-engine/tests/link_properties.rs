//! End-to-end properties of the evaluation pipeline and sweeps

use pretty_assertions::assert_eq;
use std::io::Write;
use wpt_engine::{
    evaluate, sweep_air_gap, CouplingState, Engine, EngineConfig, EngineError, GapRange, SimulationInput,
    Warning,
};

fn reference_input() -> SimulationInput {
    SimulationInput {
        air_gap_mm: 10.0,
        frequency_khz: 200.0,
        required_power_w: 10.0,
        input_voltage_v: 12.0,
        coil_radius_mm: 50.0,
        primary_turns: 20,
        secondary_turns: 20,
        load_resistance_ohm: 10.0,
        wire_diameter_mm: None,
    }
}

/// A spread of valid operating points
fn grid() -> Vec<SimulationInput> {
    let mut inputs = Vec::new();
    for &radius in &[10.0, 25.0, 60.0, 100.0] {
        for &(n1, n2) in &[(5, 5), (20, 35), (50, 50)] {
            for &gap in &[1.0, 7.5, 30.0, 50.0] {
                for &load in &[1.0, 10.0, 100.0] {
                    inputs.push(SimulationInput {
                        air_gap_mm: gap,
                        coil_radius_mm: radius,
                        primary_turns: n1,
                        secondary_turns: n2,
                        load_resistance_ohm: load,
                        ..reference_input()
                    });
                }
            }
        }
    }
    inputs
}

#[test]
fn test_reference_scenario_coupling() {
    let result = evaluate(&reference_input()).unwrap();
    assert!(result.coupling_k >= 0.3 && result.coupling_k <= 0.7, "k = {}", result.coupling_k);
    assert_eq!(result.coupling_state, CouplingState::Over);

    let x = result.coupling_k.powi(2) * result.q1 * result.q2;
    let eta = x / (1.0 + (1.0 + x).sqrt()).powi(2);
    assert!((result.efficiency_pct / 100.0 - eta).abs() < 1e-12);
}

#[test]
fn test_invariants_hold_across_valid_inputs() {
    for input in grid() {
        let r = evaluate(&input).unwrap();

        assert!(r.coupling_k >= 0.0);
        assert!(r.coupling_k <= 1.0 || r.k_exceeds_unity, "{:?}", input);
        assert!(r.k_effective <= 1.0);
        assert!((0.0..=100.0).contains(&r.efficiency_pct));
        assert!((0.0..=100.0).contains(&r.load.efficiency_pct));
        assert!(r.load.efficiency_pct <= r.efficiency_pct + 1e-9);

        // Energy conservation for both operating points
        let delivered = r.power_input_w - r.power_loss_w;
        assert!((delivered - input.required_power_w).abs() / input.required_power_w < 1e-6);
        let delivered = r.load.power_input_w - r.load.power_loss_w;
        assert!((delivered - input.required_power_w).abs() / input.required_power_w < 1e-6);

        // Exactly one regime, consistent with k vs k_c
        let kc = 1.0 / (r.q1 * r.q2).sqrt();
        assert!((r.k_critical - kc).abs() <= 1e-12 * kc);
        match r.coupling_state {
            CouplingState::Over => assert!(r.coupling_k > kc),
            CouplingState::Under => assert!(r.coupling_k < kc),
            CouplingState::Critical => assert!((r.coupling_k - kc).abs() <= 0.005 * kc),
        }
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let input = reference_input();
    let first = evaluate(&input).unwrap();
    let second = evaluate(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.efficiency_pct.to_bits(), second.efficiency_pct.to_bits());
}

#[test]
fn test_gap_extremes() {
    let input = reference_input();
    let near = evaluate(&input.with_air_gap(1.0)).unwrap();
    let far = evaluate(&input.with_air_gap(50.0)).unwrap();
    assert!(near.efficiency_pct > far.efficiency_pct);
    assert!(near.coupling_k > far.coupling_k);

    for gap in [0.0, 51.0] {
        match evaluate(&input.with_air_gap(gap)) {
            Err(EngineError::Validation(e)) => {
                assert_eq!(e.field, "air_gap_mm");
                assert_eq!(e.value, gap);
            }
            other => panic!("Expected validation error for gap {}, got {:?}", gap, other),
        }
    }
}

#[test]
fn test_wide_short_coils_flag_coupling_breakdown() {
    // 50 turns of 5mm wire on a 10mm radius: M/L > 1 at a 1mm gap
    let input = SimulationInput {
        air_gap_mm: 1.0,
        coil_radius_mm: 10.0,
        primary_turns: 50,
        secondary_turns: 50,
        wire_diameter_mm: Some(5.0),
        ..reference_input()
    };
    let r = evaluate(&input).unwrap();
    assert!(r.coupling_k > 1.0);
    assert!(r.k_exceeds_unity);
    assert_eq!(r.k_effective, 1.0);
    assert!(r.warnings.iter().any(|w| matches!(w, Warning::CouplingClamped { raw_k, .. } if *raw_k == r.coupling_k)));
    assert!(r.efficiency_pct <= 100.0);
}

#[test]
fn test_sweep_points_satisfy_single_point_invariants() {
    let sweep = sweep_air_gap(&reference_input(), GapRange::default(), 50).unwrap();
    assert_eq!(sweep.points.len(), 50);

    let mut previous: Option<(f64, f64, f64)> = None;
    for p in &sweep.points {
        assert!(p.coupling_k >= 0.0 && p.coupling_k <= 1.0);
        assert!((0.0..=100.0).contains(&p.efficiency_pct));
        if let Some((gap, k, eta)) = previous {
            assert!(p.air_gap_mm > gap);
            assert!(p.coupling_k < k);
            assert!(p.efficiency_pct < eta);
        }
        previous = Some((p.air_gap_mm, p.coupling_k, p.efficiency_pct));
    }
}

#[test]
fn test_config_file_overrides_constants() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"default_wire_diameter_mm": 0.5, "critical_tolerance": 0.01}}"#).unwrap();

    let json = std::fs::read_to_string(file.path()).unwrap();
    let config = EngineConfig::from_json(&json).unwrap();
    assert_eq!(config.default_wire_diameter_mm, 0.5);
    assert_eq!(config.copper_resistivity, EngineConfig::default().copper_resistivity);

    // Same wire either way: default from config vs explicit in the request
    let engine = Engine::new(config);
    let from_config = engine.evaluate(&reference_input()).unwrap();
    let explicit = Engine::default()
        .evaluate(&SimulationInput { wire_diameter_mm: Some(0.5), ..reference_input() })
        .unwrap();
    assert_eq!(from_config.l1_uh, explicit.l1_uh);
    assert_eq!(from_config.q1, explicit.q1);
}
