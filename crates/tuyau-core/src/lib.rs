pub mod constants;
pub mod elements;
pub mod error;
pub mod excitation;
pub mod geometry;
pub mod impedance;
pub mod resonance;
pub mod sweep;
pub mod transfer_matrix;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use excitation::FlowExcitation;
pub use geometry::{End, PipeGeometry, SideHole, Termination};

// ---------------------------------------------------------------------------
// Shared interface types consumed by the front end
// ---------------------------------------------------------------------------

/// Ambient conditions of the air column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Speed of the air flow across the mouth in m/s.
    #[serde(default)]
    pub air_speed: f64,
}

impl Default for EnvironmentalConditions {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            air_speed: 10.0, // 36 km/h
        }
    }
}

impl EnvironmentalConditions {
    pub fn new(temperature: f64, air_speed: f64) -> Self {
        Self {
            temperature,
            air_speed,
        }
    }

    pub fn validate(&self) -> Result<()> {
        error::ensure_within("temperature", self.temperature, constants::TEMPERATURE_RANGE)?;
        error::ensure_within("air_speed", self.air_speed, constants::AIR_SPEED_RANGE)
    }
}

/// Knobs that change how the result is computed or reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceOptions {
    /// Number of modes to list, fundamental included.
    pub harmonics: usize,
    /// Add the open-end radiation correction at each open end.
    pub end_correction: bool,
}

impl Default for ResonanceOptions {
    fn default() -> Self {
        Self {
            harmonics: constants::DEFAULT_HARMONICS,
            end_correction: false,
        }
    }
}

impl ResonanceOptions {
    pub fn validate(&self) -> Result<()> {
        if self.harmonics == 0 || self.harmonics > constants::MAX_HARMONICS {
            return Err(Error::invalid(
                "harmonics",
                format!(
                    "must be within [1, {}], got {}",
                    constants::MAX_HARMONICS,
                    self.harmonics
                ),
            ));
        }
        Ok(())
    }
}

/// One mode of the resonator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// 1-based position in the listed series.
    pub index: usize,
    /// Integer multiple of the fundamental.
    pub multiple: u32,
    /// Frequency in Hz.
    pub frequency: f64,
}

/// Everything the calculator derives from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyResult {
    /// Speed of sound at the given temperature (m/s).
    pub speed_of_sound: f64,
    /// Length of the plain pipe with the same fundamental (m).
    pub effective_length: f64,
    /// Wavelength of the fundamental (m).
    pub wavelength: f64,
    /// Fundamental frequency in Hz.
    pub fundamental: f64,
    /// Fundamental of the same pipe with every hole closed (Hz).
    pub open_bore_fundamental: f64,
    /// Modes in ascending order; the first is the fundamental.
    pub harmonics: Vec<Harmonic>,
    /// Flow-induced excitation estimate.
    pub flow: FlowExcitation,
}

/// Trait for acoustic elements that can produce a 2×2 transfer matrix
/// at a given angular frequency.
pub trait AcousticElement: Send + Sync {
    /// Compute the 2×2 transfer matrix at angular frequency `omega` (rad/s)
    /// with the given speed of sound `c` (m/s) and air density `rho` (kg/m³).
    fn transfer_matrix(&self, omega: f64, c: f64, rho: f64) -> transfer_matrix::TransferMatrix;
}

/// Compute the resonance frequencies with default options.
pub fn compute(
    geometry: &PipeGeometry,
    conditions: &EnvironmentalConditions,
) -> Result<FrequencyResult> {
    compute_with(geometry, conditions, &ResonanceOptions::default())
}

/// Validate every input, then compute the resonance frequencies.
pub fn compute_with(
    geometry: &PipeGeometry,
    conditions: &EnvironmentalConditions,
    options: &ResonanceOptions,
) -> Result<FrequencyResult> {
    geometry.validate()?;
    conditions.validate()?;
    options.validate()?;
    Ok(resonance::resonate(geometry, conditions, options))
}
