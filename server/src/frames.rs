//! Binary sweep frames for WebSocket chart updates
//!
//! Layout: 8-byte tag, u32 point count, then one f32 LE column per series.

use wpt_engine::{AirGapSweep, FrequencySweep};

pub const GAP_SWEEP_TAG: &[u8; 8] = b"SWEEP\0\0\0";
pub const FREQUENCY_SWEEP_TAG: &[u8; 8] = b"FSWEEP\0\0";

fn push_column(data: &mut Vec<u8>, values: impl Iterator<Item = f64>) {
    for v in values {
        data.extend_from_slice(&(v as f32).to_le_bytes());
    }
}

/// Columns: gap_mm, efficiency_pct, coupling_k, load_efficiency_pct
pub fn encode_gap_sweep(sweep: &AirGapSweep) -> Vec<u8> {
    let points = &sweep.points;
    let mut data = Vec::with_capacity(12 + points.len() * 16);

    data.extend_from_slice(GAP_SWEEP_TAG);
    data.extend_from_slice(&(points.len() as u32).to_le_bytes());

    push_column(&mut data, points.iter().map(|p| p.air_gap_mm));
    push_column(&mut data, points.iter().map(|p| p.efficiency_pct));
    push_column(&mut data, points.iter().map(|p| p.coupling_k));
    push_column(&mut data, points.iter().map(|p| p.load_efficiency_pct));

    data
}

/// Columns: frequency_khz, efficiency_pct, load_efficiency_pct
pub fn encode_frequency_sweep(sweep: &FrequencySweep) -> Vec<u8> {
    let points = &sweep.points;
    let mut data = Vec::with_capacity(12 + points.len() * 12);

    data.extend_from_slice(FREQUENCY_SWEEP_TAG);
    data.extend_from_slice(&(points.len() as u32).to_le_bytes());

    push_column(&mut data, points.iter().map(|p| p.frequency_khz));
    push_column(&mut data, points.iter().map(|p| p.efficiency_pct));
    push_column(&mut data, points.iter().map(|p| p.load_efficiency_pct));

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpt_engine::{sweep_air_gap, sweep_frequency, FrequencyRange, GapRange, SimulationInput};

    fn read_f32(data: &[u8], index: usize) -> f32 {
        let offset = 12 + index * 4;
        f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    #[test]
    fn test_gap_sweep_frame_layout() {
        let sweep = sweep_air_gap(&SimulationInput::default(), GapRange::default(), 10).unwrap();
        let data = encode_gap_sweep(&sweep);

        assert_eq!(&data[0..8], GAP_SWEEP_TAG);
        assert_eq!(u32::from_le_bytes([data[8], data[9], data[10], data[11]]), 10);
        assert_eq!(data.len(), 12 + 10 * 4 * 4);

        // First gap column entry, then first coupling entry
        assert_eq!(read_f32(&data, 0), 1.0);
        assert_eq!(read_f32(&data, 9), 50.0);
        assert_eq!(read_f32(&data, 20), sweep.points[0].coupling_k as f32);
    }

    #[test]
    fn test_frequency_sweep_frame_layout() {
        let sweep = sweep_frequency(&SimulationInput::default(), FrequencyRange::default(), 5).unwrap();
        let data = encode_frequency_sweep(&sweep);

        assert_eq!(&data[0..8], FREQUENCY_SWEEP_TAG);
        assert_eq!(data.len(), 12 + 5 * 3 * 4);
        assert_eq!(read_f32(&data, 0), 10.0);
        assert_eq!(read_f32(&data, 4), 1000.0);
    }
}
