use serde::{Deserialize, Serialize};

use crate::constants::MAX_SWEEP_STEPS;
use crate::error::{Error, Result};
use crate::{compute_with, EnvironmentalConditions, PipeGeometry, ResonanceOptions};

/// Input that a sweep varies while everything else is held fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Pipe length (m). Holes keep their fractional position.
    Length,
    /// Bore diameter (m).
    Diameter,
    /// Air flow speed (m/s).
    AirSpeed,
    /// Temperature (°C).
    Temperature,
    /// Position of the hole nearest the mouth (m).
    FirstHolePosition,
}

/// One sample of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Value of the swept parameter, in SI units.
    pub value: f64,
    /// Fundamental frequency at that value (Hz).
    pub fundamental: f64,
}

/// Evaluate the fundamental at `steps` evenly spaced values of `parameter`
/// from `start` to `end`, both included.
pub fn sweep(
    geometry: &PipeGeometry,
    conditions: &EnvironmentalConditions,
    options: &ResonanceOptions,
    parameter: SweepParameter,
    start: f64,
    end: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>> {
    geometry.validate()?;
    conditions.validate()?;
    options.validate()?;

    if !(2..=MAX_SWEEP_STEPS).contains(&steps) {
        return Err(Error::invalid(
            "steps",
            format!("must be within [2, {MAX_SWEEP_STEPS}], got {steps}"),
        ));
    }
    if !start.is_finite() || !end.is_finite() || start >= end {
        return Err(Error::invalid(
            "range",
            format!("must be finite with start < end, got {start}..{end}"),
        ));
    }
    let first_hole = geometry.first_hole_index();
    if parameter == SweepParameter::FirstHolePosition && first_hole.is_none() {
        return Err(Error::invalid("holes", "sweeping the first hole needs at least one hole"));
    }

    let increment = (end - start) / (steps - 1) as f64;
    let mut points = Vec::with_capacity(steps);

    for i in 0..steps {
        let value = if i == steps - 1 {
            end
        } else {
            start + i as f64 * increment
        };

        let mut g = geometry.clone();
        let mut c = *conditions;
        match parameter {
            SweepParameter::Length => {
                let scale = value / geometry.length;
                for hole in &mut g.holes {
                    hole.position *= scale;
                }
                g.length = value;
            }
            SweepParameter::Diameter => g.diameter = value,
            SweepParameter::AirSpeed => c.air_speed = value,
            SweepParameter::Temperature => c.temperature = value,
            SweepParameter::FirstHolePosition => {
                if let Some(index) = first_hole {
                    g.holes[index].position = value;
                }
            }
        }

        let result = compute_with(&g, &c, options).map_err(|e| {
            tracing::warn!(?parameter, value, "sweep point rejected: {e}");
            e
        })?;
        points.push(SweepPoint {
            value,
            fundamental: result.fundamental,
        });
    }

    tracing::debug!(?parameter, start, end, steps, "sweep complete");
    Ok(points)
}
