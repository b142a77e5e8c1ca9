/// Temperature range (°C) over which the ideal-gas model is accepted.
pub const TEMPERATURE_RANGE: (f64, f64) = (-50.0, 100.0);

/// Air flow speed range (m/s).
pub const AIR_SPEED_RANGE: (f64, f64) = (0.0, 100.0);

/// End correction per side of the pipe wall, as a fraction of the hole
/// diameter.
pub const HOLE_END_CORRECTION: f64 = 0.3;

/// Unflanged open-end correction (Levine–Schwinger), as a fraction of the
/// pipe radius.
pub const OPEN_END_CORRECTION: f64 = 0.6133;

/// Strouhal number for vortex shedding across the pipe mouth.
pub const STROUHAL: f64 = 0.2;

/// Number of modes listed when the caller does not ask for a count.
pub const DEFAULT_HARMONICS: usize = 5;

/// Largest number of modes a single calculation will list.
pub const MAX_HARMONICS: usize = 1_000;

/// Largest number of frequency bins an impedance spectrum may hold.
pub const MAX_SPECTRUM_BINS: usize = 1_000_000;

/// Largest number of points a parameter sweep may evaluate.
pub const MAX_SWEEP_STEPS: usize = 100_000;

/// Speed of sound in air (m/s) and density (kg/m³) as a function of
/// temperature in °C. Uses the ideal-gas approximation.
pub fn speed_of_sound_and_density(temperature_c: f64) -> (f64, f64) {
    let t_kelvin = temperature_c + 273.15;
    // c = 331.3 * sqrt(T/273.15)
    let c = 331.3 * (t_kelvin / 273.15).sqrt();
    // ρ = p / (R_specific * T), with p = 101325 Pa, R_specific = 287.05 J/(kg·K)
    let rho = 101325.0 / (287.05 * t_kelvin);
    (c, rho)
}

/// Speed of sound alone, for callers that have no use for the density.
pub fn speed_of_sound(temperature_c: f64) -> f64 {
    speed_of_sound_and_density(temperature_c).0
}

/// Cross-sectional area from diameter (both in metres).
pub fn area_from_diameter(diameter: f64) -> f64 {
    std::f64::consts::PI * (diameter / 2.0).powi(2)
}

/// Effective chimney height of an open side hole of diameter `d`.
pub fn hole_chimney_height(hole_diameter: f64) -> f64 {
    2.0 * HOLE_END_CORRECTION * hole_diameter
}

/// Open-end length correction for a pipe of the given diameter.
pub fn open_end_correction(pipe_diameter: f64) -> f64 {
    OPEN_END_CORRECTION * pipe_diameter / 2.0
}
