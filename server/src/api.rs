//! REST handlers: single evaluation and sweeps

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use wpt_engine::{
    EngineError, FrequencyRange, GapRange, SimulationInput, SimulationResult, SkippedSample,
};

use crate::frames;
use crate::{AppState, Push};

/// Engine failure mapped to a 422 with the offending field or stage
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let body = match &self.0 {
            EngineError::Validation(e) => json!({
                "kind": "validation",
                "field": e.field,
                "value": e.value,
                "min": e.min,
                "max": e.max,
                "message": message,
            }),
            EngineError::Domain(e) => json!({
                "kind": "domain",
                "stage": e.stage,
                "quantity": e.quantity,
                "value": e.value,
                "message": message,
            }),
        };
        warn!("Rejected request: {}", message);
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct SimulateResponse {
    pub params: SimulationInput,
    pub results: SimulationResult,
}

pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(params): Json<SimulationInput>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let results = state.engine.evaluate(&params)?;

    if let Ok(text) = serde_json::to_string(&results) {
        *state.latest_result.write().await = Some(text.clone());
        let _ = state.push_tx.send(Push::Result(text));
    }

    Ok(Json(SimulateResponse { params, results }))
}

/// Query parameters shared by both sweeps; fields the sweep varies are ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepQuery {
    pub min_gap_mm: Option<f64>,
    pub max_gap_mm: Option<f64>,
    pub min_freq_khz: Option<f64>,
    pub max_freq_khz: Option<f64>,
    pub steps: Option<usize>,
    pub air_gap_mm: f64,
    pub frequency_khz: f64,
    pub power_w: f64,
    pub input_voltage_v: f64,
    pub coil_radius_mm: f64,
    pub primary_turns: u32,
    pub secondary_turns: u32,
    pub load_resistance_ohm: f64,
    pub wire_diameter_mm: Option<f64>,
}

impl Default for SweepQuery {
    fn default() -> Self {
        let input = SimulationInput::default();
        Self {
            min_gap_mm: None,
            max_gap_mm: None,
            min_freq_khz: None,
            max_freq_khz: None,
            steps: None,
            air_gap_mm: input.air_gap_mm,
            frequency_khz: input.frequency_khz,
            power_w: input.required_power_w,
            input_voltage_v: input.input_voltage_v,
            coil_radius_mm: input.coil_radius_mm,
            primary_turns: input.primary_turns,
            secondary_turns: input.secondary_turns,
            load_resistance_ohm: input.load_resistance_ohm,
            wire_diameter_mm: input.wire_diameter_mm,
        }
    }
}

impl SweepQuery {
    fn input(&self) -> SimulationInput {
        SimulationInput {
            air_gap_mm: self.air_gap_mm,
            frequency_khz: self.frequency_khz,
            required_power_w: self.power_w,
            input_voltage_v: self.input_voltage_v,
            coil_radius_mm: self.coil_radius_mm,
            primary_turns: self.primary_turns,
            secondary_turns: self.secondary_turns,
            load_resistance_ohm: self.load_resistance_ohm,
            wire_diameter_mm: self.wire_diameter_mm,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AirGapColumns {
    pub gaps_mm: Vec<f64>,
    pub efficiencies: Vec<f64>,
    pub couplings: Vec<f64>,
    pub load_efficiencies: Vec<f64>,
    pub power_inputs: Vec<f64>,
    pub power_outputs: Vec<f64>,
    pub power_losses: Vec<f64>,
    pub skipped: Vec<SkippedSample>,
}

pub async fn sweep_airgap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SweepQuery>,
) -> Result<Json<AirGapColumns>, ApiError> {
    let defaults = state.engine.config();
    let range = GapRange {
        start_mm: query.min_gap_mm.unwrap_or(defaults.gap_range.start_mm),
        stop_mm: query.max_gap_mm.unwrap_or(defaults.gap_range.stop_mm),
    };
    let steps = query.steps.unwrap_or(defaults.sweep_samples);
    let sweep = state.engine.sweep_air_gap(&query.input(), range, steps)?;

    info!(
        "Air gap sweep: {:.1}-{:.1}mm, {} points, {} skipped",
        range.start_mm,
        range.stop_mm,
        sweep.points.len(),
        sweep.skipped.len()
    );

    let frame = frames::encode_gap_sweep(&sweep);
    *state.latest_sweep.write().await = Some(frame.clone());
    let _ = state.push_tx.send(Push::Sweep(frame));

    let points = &sweep.points;
    Ok(Json(AirGapColumns {
        gaps_mm: points.iter().map(|p| p.air_gap_mm).collect(),
        efficiencies: points.iter().map(|p| p.efficiency_pct).collect(),
        couplings: points.iter().map(|p| p.coupling_k).collect(),
        load_efficiencies: points.iter().map(|p| p.load_efficiency_pct).collect(),
        power_inputs: points.iter().map(|p| p.power_input_w).collect(),
        power_outputs: points.iter().map(|p| p.power_output_w).collect(),
        power_losses: points.iter().map(|p| p.power_loss_w).collect(),
        skipped: sweep.skipped,
    }))
}

#[derive(Debug, Serialize)]
pub struct FrequencyColumns {
    pub frequencies_khz: Vec<f64>,
    pub efficiencies: Vec<f64>,
    pub load_efficiencies: Vec<f64>,
    pub skipped: Vec<SkippedSample>,
}

pub async fn sweep_frequency(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SweepQuery>,
) -> Result<Json<FrequencyColumns>, ApiError> {
    let defaults = state.engine.config();
    let range = FrequencyRange {
        start_khz: query.min_freq_khz.unwrap_or(defaults.frequency_range.start_khz),
        stop_khz: query.max_freq_khz.unwrap_or(defaults.frequency_range.stop_khz),
    };
    let steps = query.steps.unwrap_or(defaults.sweep_samples);
    let sweep = state.engine.sweep_frequency(&query.input(), range, steps)?;

    info!(
        "Frequency sweep: {:.0}-{:.0}kHz, {} points, {} skipped",
        range.start_khz,
        range.stop_khz,
        sweep.points.len(),
        sweep.skipped.len()
    );

    let frame = frames::encode_frequency_sweep(&sweep);
    *state.latest_sweep.write().await = Some(frame.clone());
    let _ = state.push_tx.send(Push::Sweep(frame));

    let points = &sweep.points;
    Ok(Json(FrequencyColumns {
        frequencies_khz: points.iter().map(|p| p.frequency_khz).collect(),
        efficiencies: points.iter().map(|p| p.efficiency_pct).collect(),
        load_efficiencies: points.iter().map(|p| p.load_efficiency_pct).collect(),
        skipped: sweep.skipped,
    }))
}
