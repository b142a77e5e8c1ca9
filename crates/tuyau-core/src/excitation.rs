use serde::{Deserialize, Serialize};

use crate::constants::STROUHAL;
use crate::Harmonic;

/// Estimate of how the air flow drives the column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowExcitation {
    /// Vortex-shedding frequency across the mouth, `St·U/D` (Hz).
    pub shedding_frequency: f64,
    /// Index of the listed mode closest to the shedding frequency.
    pub nearest_mode: usize,
    /// Ratio of shedding frequency to the nearest mode's frequency.
    pub detuning: f64,
}

/// Shedding frequency for flow speed `air_speed` (m/s) over a mouth of
/// diameter `diameter` (m).
pub fn shedding_frequency(air_speed: f64, diameter: f64) -> f64 {
    STROUHAL * air_speed / diameter
}

/// Pair the shedding frequency with the closest mode in `modes`.
///
/// `modes` must not be empty.
pub fn analyse(air_speed: f64, diameter: f64, modes: &[Harmonic]) -> FlowExcitation {
    let fs = shedding_frequency(air_speed, diameter);
    let nearest = modes
        .iter()
        .min_by(|a, b| (a.frequency - fs).abs().total_cmp(&(b.frequency - fs).abs()))
        .copied()
        .unwrap_or(Harmonic {
            index: 1,
            multiple: 1,
            frequency: fs,
        });

    FlowExcitation {
        shedding_frequency: fs,
        nearest_mode: nearest.index,
        detuning: fs / nearest.frequency,
    }
}
