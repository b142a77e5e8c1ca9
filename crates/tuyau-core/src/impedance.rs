//! Plane-wave input impedance of the bore, used to cross-check the lumped
//! effective-length model.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::{open_end_correction, speed_of_sound_and_density, MAX_SPECTRUM_BINS};
use crate::elements::{StraightDuct, ToneHole};
use crate::error::{ensure_positive, Error, Result};
use crate::geometry::{End, PipeGeometry};
use crate::transfer_matrix::TransferMatrix;
use crate::{AcousticElement, EnvironmentalConditions};

/// An ordered chain of acoustic elements from mouth to foot.
pub struct Bore {
    elements: Vec<Box<dyn AcousticElement>>,
    /// Boundary condition at the mouth, where the impedance is observed.
    pub mouth: End,
    /// Boundary condition terminating the chain.
    pub foot: End,
}

impl Bore {
    /// Create a bore from a custom list of elements.
    pub fn new(elements: Vec<Box<dyn AcousticElement>>, mouth: End, foot: End) -> Self {
        Self {
            elements,
            mouth,
            foot,
        }
    }

    /// Split the pipe at each hole into duct segments and tone-hole shunts.
    /// With `end_correction`, each open end is extended by `0.6133·r`.
    pub fn from_geometry(geometry: &PipeGeometry, end_correction: bool) -> Self {
        let correction = open_end_correction(geometry.diameter);
        let extension = |end: End| {
            if end_correction && end == End::Open {
                correction
            } else {
                0.0
            }
        };

        let mut elements: Vec<Box<dyn AcousticElement>> = Vec::new();
        let mut position = -extension(geometry.ends.mouth);
        for hole in geometry.sorted_holes() {
            elements.push(Box::new(StraightDuct::new(
                hole.position - position,
                geometry.diameter,
            )));
            elements.push(Box::new(ToneHole::new(hole.diameter)));
            position = hole.position;
        }
        let foot = geometry.length + extension(geometry.ends.foot);
        elements.push(Box::new(StraightDuct::new(foot - position, geometry.diameter)));

        Self::new(elements, geometry.ends.mouth, geometry.ends.foot)
    }

    /// Compute the total transfer matrix at angular frequency `omega`.
    pub fn total_transfer_matrix(&self, omega: f64, c: f64, rho: f64) -> TransferMatrix {
        let mut total = TransferMatrix::identity();
        for elem in &self.elements {
            let t = elem.transfer_matrix(omega, c, rho);
            total = total.chain(&t);
        }
        total
    }

    /// Impedance looking into the mouth at angular frequency `omega`.
    pub fn input_impedance(&self, omega: f64, c: f64, rho: f64) -> Complex64 {
        let t = self.total_transfer_matrix(omega, c, rho);
        match self.foot {
            End::Open => t.input_impedance(Complex64::new(0.0, 0.0)),
            End::Closed => t.input_impedance_rigid(),
        }
    }
}

/// A sampled impedance curve.
#[derive(Debug, Clone, Default)]
pub struct ImpedanceSpectrum {
    /// Frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// |Z_in| at each frequency (Pa·s/m³).
    pub magnitude: Vec<f64>,
}

/// Sample |Z_in| from `f_start` to `f_end` (inclusive) every `step` Hz.
pub fn impedance_spectrum(
    bore: &Bore,
    f_start: f64,
    f_end: f64,
    step: f64,
    c: f64,
    rho: f64,
) -> Result<ImpedanceSpectrum> {
    ensure_positive("f_start", f_start)?;
    ensure_positive("step", step)?;
    if !f_end.is_finite() || f_end <= f_start {
        return Err(Error::invalid(
            "f_end",
            format!("must be greater than f_start ({f_start}), got {f_end}"),
        ));
    }

    let bins = ((f_end - f_start) / step).floor() + 1.0;
    if bins > MAX_SPECTRUM_BINS as f64 {
        return Err(Error::invalid(
            "f_end",
            format!(
                "range {f_start}..{f_end} Hz at {step} Hz steps needs {bins} bins, at most {MAX_SPECTRUM_BINS} allowed"
            ),
        ));
    }
    let num_bins = bins as usize;
    let mut spectrum = ImpedanceSpectrum {
        frequencies: Vec::with_capacity(num_bins),
        magnitude: Vec::with_capacity(num_bins),
    };

    for i in 0..num_bins {
        let freq = f_start + i as f64 * step;
        let omega = 2.0 * PI * freq;
        spectrum.frequencies.push(freq);
        spectrum.magnitude.push(bore.input_impedance(omega, c, rho).norm());
    }

    Ok(spectrum)
}

/// Frequencies at which the bore resonates when driven at the mouth.
///
/// An open mouth plays at the minima of |Z_in|, a closed (reed) mouth at the
/// maxima.
pub fn find_resonances(bore: &Bore, spectrum: &ImpedanceSpectrum) -> Vec<f64> {
    let z = &spectrum.magnitude;
    let is_peak = |i: usize| match bore.mouth {
        End::Open => z[i] < z[i - 1] && z[i] <= z[i + 1],
        End::Closed => z[i] > z[i - 1] && z[i] >= z[i + 1],
    };

    (1..z.len().saturating_sub(1))
        .filter(|&i| is_peak(i))
        .map(|i| spectrum.frequencies[i])
        .collect()
}

/// Validate the inputs, build the bore and scan it up to `f_max` in `step`
/// Hz increments.
pub fn scan(
    geometry: &PipeGeometry,
    conditions: &EnvironmentalConditions,
    end_correction: bool,
    f_max: f64,
    step: f64,
) -> Result<Vec<f64>> {
    geometry.validate()?;
    conditions.validate()?;

    let (c, rho) = speed_of_sound_and_density(conditions.temperature);
    let bore = Bore::from_geometry(geometry, end_correction);
    let spectrum = impedance_spectrum(&bore, step, f_max, step, c, rho)?;
    let resonances = find_resonances(&bore, &spectrum);

    tracing::debug!(
        bins = spectrum.frequencies.len(),
        found = resonances.len(),
        "impedance scan"
    );
    Ok(resonances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Termination;
    use crate::{compute, compute_with, ResonanceOptions};

    fn conditions() -> EnvironmentalConditions {
        EnvironmentalConditions::new(20.0, 0.0)
    }

    fn assert_matches_series(found: &[f64], expected: &[f64], tolerance: f64) {
        assert!(
            found.len() >= expected.len(),
            "found {found:?}, expected at least {expected:?}"
        );
        for (f, e) in found.iter().zip(expected) {
            assert!((f - e).abs() <= tolerance, "resonance {f} Hz, expected {e} Hz (found {found:?})");
        }
    }

    #[test]
    fn test_plain_pipe_matches_closed_form() {
        for ends in [
            Termination::OPEN_OPEN,
            Termination::OPEN_CLOSED,
            Termination::CLOSED_OPEN,
            Termination::CLOSED_CLOSED,
        ] {
            let g = PipeGeometry::new(0.5, 0.02, ends);
            let r = compute(&g, &conditions()).unwrap();
            let expected: Vec<f64> = r.harmonics.iter().take(3).map(|h| h.frequency).collect();
            let found = scan(&g, &conditions(), false, 1500.0, 1.0).unwrap();
            assert_matches_series(&found, &expected, 1.0);
        }
    }

    #[test]
    fn test_tone_holes_agree_with_lumped_model() {
        let cases = [
            PipeGeometry::new(0.6, 0.02, Termination::OPEN_OPEN).with_hole(0.4, 0.008),
            PipeGeometry::new(0.6, 0.02, Termination::OPEN_OPEN)
                .with_hole(0.3, 0.008)
                .with_hole(0.4, 0.008),
            PipeGeometry::new(0.6, 0.02, Termination::OPEN_OPEN).with_hole(0.45, 0.01),
        ];
        for g in cases {
            let lumped = compute(&g, &conditions()).unwrap().fundamental;
            let found = scan(&g, &conditions(), false, 1500.0, 1.0).unwrap();
            let first = found[0];
            let error = (first - lumped).abs() / lumped;
            assert!(
                error < 0.02,
                "holes {:?}: transfer-matrix {first} Hz vs lumped {lumped:.1} Hz",
                g.holes
            );
        }
    }

    #[test]
    fn test_end_correction_lowers_scanned_fundamental() {
        let g = PipeGeometry::new(0.5, 0.02, Termination::OPEN_OPEN);
        let options = ResonanceOptions {
            end_correction: true,
            ..Default::default()
        };
        let lumped = compute_with(&g, &conditions(), &options).unwrap().fundamental;
        let found = scan(&g, &conditions(), true, 500.0, 0.5).unwrap();
        assert!(found[0] < 343.0, "corrected fundamental {}", found[0]);
        assert!((found[0] - lumped).abs() <= 0.5, "{} vs {lumped}", found[0]);
    }

    #[test]
    fn test_spectrum_bins_inclusive() {
        let g = PipeGeometry::new(0.5, 0.02, Termination::OPEN_OPEN);
        let bore = Bore::from_geometry(&g, false);
        let (c, rho) = speed_of_sound_and_density(20.0);
        let s = impedance_spectrum(&bore, 10.0, 100.0, 10.0, c, rho).unwrap();
        assert_eq!(s.frequencies.len(), 10);
        assert_eq!(s.frequencies[0], 10.0);
        assert_eq!(*s.frequencies.last().unwrap(), 100.0);
        assert!(s.magnitude.iter().all(|z| z.is_finite()));
    }

    #[test]
    fn test_spectrum_rejects_bad_range() {
        let bore = Bore::from_geometry(&PipeGeometry::default(), false);
        assert_eq!(
            impedance_spectrum(&bore, 0.0, 100.0, 1.0, 343.0, 1.2).unwrap_err().field(),
            "f_start"
        );
        assert_eq!(
            impedance_spectrum(&bore, 100.0, 50.0, 1.0, 343.0, 1.2).unwrap_err().field(),
            "f_end"
        );
        assert_eq!(
            impedance_spectrum(&bore, 10.0, 50.0, -1.0, 343.0, 1.2).unwrap_err().field(),
            "step"
        );
    }

    #[test]
    fn test_spectrum_rejects_too_many_bins() {
        let bore = Bore::from_geometry(&PipeGeometry::default(), false);
        let err = impedance_spectrum(&bore, 0.5, 1e12, 0.5, 343.0, 1.2).unwrap_err();
        assert_eq!(err.field(), "f_end");
        let err = impedance_spectrum(&bore, 1.0, 100.0, 1e-9, 343.0, 1.2).unwrap_err();
        assert_eq!(err.field(), "f_end");

        // Exactly at the limit is still accepted.
        let max = MAX_SPECTRUM_BINS as f64;
        let s = impedance_spectrum(&bore, 1.0, max, 1.0, 343.0, 1.2).unwrap();
        assert_eq!(s.frequencies.len(), MAX_SPECTRUM_BINS);
    }

    #[test]
    fn test_scan_rejects_huge_max_frequency() {
        let g = PipeGeometry::new(0.5, 0.02, Termination::OPEN_OPEN);
        assert_eq!(scan(&g, &conditions(), false, 1e12, 0.5).unwrap_err().field(), "f_end");
    }

    #[test]
    fn test_scan_validates_geometry() {
        let g = PipeGeometry::new(-1.0, 0.02, Termination::OPEN_OPEN);
        assert_eq!(scan(&g, &conditions(), false, 1000.0, 1.0).unwrap_err().field(), "length");
    }
}
