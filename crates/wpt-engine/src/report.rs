//! Plain-text reports for the command line

use anyhow::Result;
use minijinja::{context, Environment};
use crate::input::SimulationInput;
use crate::result::SimulationResult;
use crate::sweep::{AirGapSweep, FrequencySweep};

const RESULT_TEMPLATE: &str = r##"Inductive power link report
Generated: {{ timestamp }}

Inputs
  air gap           {{ "%.2f"|format(input.air_gap_mm) }} mm
  frequency         {{ "%.1f"|format(input.frequency_khz) }} kHz
  coil radius       {{ "%.2f"|format(input.coil_radius_mm) }} mm
  turns (N1 / N2)   {{ input.primary_turns }} / {{ input.secondary_turns }}
  wire diameter     {{ "%.2f"|format(wire_diameter_mm) }} mm
  load              {{ "%.2f"|format(input.load_resistance_ohm) }} Ohm
  supply            {{ "%.2f"|format(input.input_voltage_v) }} V
  required power    {{ "%.2f"|format(input.required_power_w) }} W

Coils
  L1 / L2           {{ "%.3f"|format(r.L1_uH) }} / {{ "%.3f"|format(r.L2_uH) }} uH
  M                 {{ "%.3f"|format(r.M_uH) }} uH
  C1 / C2           {{ "%.3f"|format(r.C1_nF) }} / {{ "%.3f"|format(r.C2_nF) }} nF
  R1 / R2           {{ "%.2f"|format(r.R1_mOhm) }} / {{ "%.2f"|format(r.R2_mOhm) }} mOhm
  Q1 / Q2           {{ "%.1f"|format(r.Q1) }} / {{ "%.1f"|format(r.Q2) }}

Coupling
  k                 {{ "%.4f"|format(r.coupling_k) }}{% if r.k_exceeds_unity %} (exceeds 1, efficiency uses {{ "%.4f"|format(r.k_effective) }}){% endif %}
  k critical        {{ "%.5f"|format(r.k_critical) }}
  state             {{ r.coupling_state }}

Optimal load matching (upper bound)
  efficiency        {{ "%.2f"|format(r.efficiency_pct) }} %
  optimal load      {{ "%.2f"|format(r.optimal_load_ohm) }} Ohm
  P in / loss       {{ "%.3f"|format(r.power_input_W) }} / {{ "%.3f"|format(r.power_loss_W) }} W
  I1 / I2           {{ "%.3f"|format(r.primary_current_A) }} / {{ "%.3f"|format(r.secondary_current_A) }} A

Actual load
  efficiency        {{ "%.2f"|format(r.load.efficiency_pct) }} %
  P in / loss       {{ "%.3f"|format(r.load.power_input_W) }} / {{ "%.3f"|format(r.load.power_loss_W) }} W
  I1 / I2           {{ "%.3f"|format(r.load.primary_current_A) }} / {{ "%.3f"|format(r.load.secondary_current_A) }} A
  drive voltage     {{ "%.2f"|format(r.load.drive_voltage_V) }} V{% if r.load.exceeds_supply %} (above supply){% endif %}
{% if r.warnings|length > 0 %}
Warnings
{% for w in r.warnings %}  - {{ w.kind }}
{% endfor %}{% endif %}"##;

const GAP_SWEEP_TEMPLATE: &str = r##"Air gap sweep
Generated: {{ timestamp }}

  gap (mm)   eta max (%)   eta load (%)   k
{% for p in points %}  {{ "%.2f"|format(p.air_gap_mm) }}   {{ "%.3f"|format(p.efficiency_pct) }}   {{ "%.3f"|format(p.load_efficiency_pct) }}   {{ "%.4f"|format(p.coupling_k) }}
{% endfor %}{% for s in skipped %}  skipped {{ "%.2f"|format(s.at) }} mm: {{ s.error.quantity }} ({{ s.error.stage }})
{% endfor %}"##;

const FREQUENCY_SWEEP_TEMPLATE: &str = r##"Frequency sweep
Generated: {{ timestamp }}

  f (kHz)    eta max (%)   eta load (%)
{% for p in points %}  {{ "%.1f"|format(p.frequency_khz) }}   {{ "%.3f"|format(p.efficiency_pct) }}   {{ "%.3f"|format(p.load_efficiency_pct) }}
{% endfor %}{% for s in skipped %}  skipped {{ "%.1f"|format(s.at) }} kHz: {{ s.error.quantity }} ({{ s.error.stage }})
{% endfor %}"##;

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("result", RESULT_TEMPLATE)?;
    env.add_template("gap_sweep", GAP_SWEEP_TEMPLATE)?;
    env.add_template("frequency_sweep", FREQUENCY_SWEEP_TEMPLATE)?;
    Ok(env)
}

/// Render a single evaluation
pub fn render_result(input: &SimulationInput, result: &SimulationResult, wire_diameter_mm: f64) -> Result<String> {
    let env = environment()?;
    let output = env.get_template("result")?.render(context! {
        timestamp => chrono::Utc::now().to_rfc3339(),
        input => input,
        wire_diameter_mm => wire_diameter_mm,
        r => result,
    })?;
    Ok(output)
}

/// Render an air-gap sweep as a table
pub fn render_gap_sweep(sweep: &AirGapSweep) -> Result<String> {
    let env = environment()?;
    let output = env.get_template("gap_sweep")?.render(context! {
        timestamp => chrono::Utc::now().to_rfc3339(),
        points => &sweep.points,
        skipped => &sweep.skipped,
    })?;
    Ok(output)
}

/// Render a frequency sweep as a table
pub fn render_frequency_sweep(sweep: &FrequencySweep) -> Result<String> {
    let env = environment()?;
    let output = env.get_template("frequency_sweep")?.render(context! {
        timestamp => chrono::Utc::now().to_rfc3339(),
        points => &sweep.points,
        skipped => &sweep.skipped,
    })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::GapRange;
    use crate::Engine;

    #[test]
    fn test_result_report_renders() {
        let input = SimulationInput { input_voltage_v: 48.0, ..Default::default() };
        let result = Engine::default().evaluate(&input).unwrap();
        let text = render_result(&input, &result, 1.0).unwrap();

        assert!(text.contains("Inductive power link report"));
        assert!(text.contains("state             OVER"));
        assert!(text.contains("turns (N1 / N2)   20 / 20"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_result_report_lists_warnings() {
        // 12 V cannot drive 10 W through this link at the actual load
        let input = SimulationInput { input_voltage_v: 12.0, coil_radius_mm: 50.0, air_gap_mm: 10.0, ..Default::default() };
        let result = Engine::default().evaluate(&input).unwrap();
        let text = render_result(&input, &result, 1.0).unwrap();

        assert!(text.contains("(above supply)"));
        assert!(text.contains("- supply_exceeded"));
    }

    #[test]
    fn test_gap_sweep_report_has_one_row_per_point() {
        let sweep = Engine::default()
            .sweep_air_gap(&SimulationInput::default(), GapRange::default(), 7)
            .unwrap();
        let text = render_gap_sweep(&sweep).unwrap();
        let rows = text.lines().filter(|l| l.trim_start().starts_with(|c: char| c.is_ascii_digit())).count();
        assert_eq!(rows, 7);
    }
}
