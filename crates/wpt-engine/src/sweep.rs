//! Air-gap and frequency sweeps for charting
//!
//! Each sample re-runs the whole pipeline. A sample that fails with a
//! [`DomainError`] is dropped and recorded in `skipped`; range and sample
//! count problems fail the sweep before any sample is evaluated.

use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::engine::Engine;
use crate::error::{DomainError, EngineError, ValidationError};
use crate::input::{Limits, SimulationInput, AIR_GAP_MM, FREQUENCY_KHZ};
use crate::units::ratio_to_percent;

/// Generates `n` linearly spaced samples in [start, stop]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            // Pin the last sample so rounding cannot push it past `stop`
            (0..n).map(|i| if i == n - 1 { stop } else { start + step * i as f64 }).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples in [start, stop]; both must be positive
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let (log_start, log_stop) = (start.log10(), stop.log10());
    linspace(log_start, log_stop, n)
        .into_iter()
        .enumerate()
        .map(|(i, e)| if i == 0 { start } else if i == n - 1 { stop } else { 10f64.powf(e) })
        .collect()
}

/// Air gap interval in mm, endpoints inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapRange {
    pub start_mm: f64,
    pub stop_mm: f64,
}

impl Default for GapRange {
    fn default() -> Self {
        Self { start_mm: AIR_GAP_MM.min, stop_mm: AIR_GAP_MM.max }
    }
}

/// Drive frequency interval in kHz, endpoints inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub start_khz: f64,
    pub stop_khz: f64,
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self { start_khz: FREQUENCY_KHZ.min, stop_khz: FREQUENCY_KHZ.max }
    }
}

/// A sample omitted from a sweep, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSample {
    /// Swept variable at this sample (mm or kHz)
    pub at: f64,
    pub error: DomainError,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub air_gap_mm: f64,
    pub efficiency_pct: f64,
    pub coupling_k: f64,
    pub load_efficiency_pct: f64,
    pub power_input_w: f64,
    pub power_output_w: f64,
    pub power_loss_w: f64,
}

/// Points ordered by increasing air gap
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AirGapSweep {
    pub points: Vec<SweepPoint>,
    pub skipped: Vec<SkippedSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyPoint {
    pub frequency_khz: f64,
    pub efficiency_pct: f64,
    pub load_efficiency_pct: f64,
}

/// Points ordered by increasing frequency
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FrequencySweep {
    pub points: Vec<FrequencyPoint>,
    pub skipped: Vec<SkippedSample>,
}

pub(crate) fn check_range(
    limits: Limits,
    start_field: &'static str,
    stop_field: &'static str,
    start: f64,
    stop: f64,
) -> Result<(), ValidationError> {
    limits.check(start_field, start)?;
    limits.check(stop_field, stop)?;
    if start >= stop {
        // stop must lie strictly above start
        return Err(ValidationError::new(stop_field, stop, start, limits.max));
    }
    Ok(())
}

pub(crate) fn check_samples(samples: usize) -> Result<(), ValidationError> {
    if samples < 2 {
        return Err(ValidationError::new("samples", samples as f64, 2.0, f64::INFINITY));
    }
    Ok(())
}

pub(crate) fn air_gap(
    engine: &Engine,
    input: &SimulationInput,
    range: GapRange,
    samples: usize,
) -> Result<AirGapSweep, EngineError> {
    check_range(AIR_GAP_MM, "start_mm", "stop_mm", range.start_mm, range.stop_mm)?;
    check_samples(samples)?;
    input.validate()?;

    let mut sweep = AirGapSweep::default();
    for gap in linspace(range.start_mm, range.stop_mm, samples) {
        match engine.solve(&input.with_air_gap(gap)) {
            Ok(s) => sweep.points.push(SweepPoint {
                air_gap_mm: gap,
                efficiency_pct: ratio_to_percent(s.max_efficiency),
                coupling_k: s.k,
                load_efficiency_pct: ratio_to_percent(s.load.efficiency),
                power_input_w: s.budget.power_input_w,
                power_output_w: s.budget.power_output_w,
                power_loss_w: s.budget.power_loss_w,
            }),
            Err(error) => {
                warn!("Skipping air gap {:.2}mm: {}", gap, error);
                sweep.skipped.push(SkippedSample { at: gap, error });
            }
        }
    }

    Ok(sweep)
}

pub(crate) fn frequency(
    engine: &Engine,
    input: &SimulationInput,
    range: FrequencyRange,
    samples: usize,
) -> Result<FrequencySweep, EngineError> {
    check_range(FREQUENCY_KHZ, "start_khz", "stop_khz", range.start_khz, range.stop_khz)?;
    check_samples(samples)?;
    input.validate()?;

    let mut sweep = FrequencySweep::default();
    for khz in logspace(range.start_khz, range.stop_khz, samples) {
        match engine.solve(&input.with_frequency(khz)) {
            Ok(s) => sweep.points.push(FrequencyPoint {
                frequency_khz: khz,
                efficiency_pct: ratio_to_percent(s.max_efficiency),
                load_efficiency_pct: ratio_to_percent(s.load.efficiency),
            }),
            Err(error) => {
                warn!("Skipping frequency {:.1}kHz: {}", khz, error);
                sweep.skipped.push(SkippedSample { at: khz, error });
            }
        }
    }

    Ok(sweep)
}
