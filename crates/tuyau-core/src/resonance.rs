//! Closed-form resonance model: boundary rule, tone-hole shortening and the
//! harmonic series.

use crate::constants::{hole_chimney_height, open_end_correction, speed_of_sound};
use crate::excitation;
use crate::geometry::{End, ModeSeries, PipeGeometry, SideHole};
use crate::{EnvironmentalConditions, FrequencyResult, Harmonic, ResonanceOptions};

/// Length of bore, referred to the bore cross-section, that has the same
/// inertance as an open side hole: `t_e·S/S_h`.
pub fn hole_equivalent_length(hole: &SideHole, geometry: &PipeGeometry) -> f64 {
    hole_chimney_height(hole.diameter) * geometry.area() / hole.area()
}

/// Effective acoustic length of the air column.
///
/// Holes are processed from the foot toward the mouth. The column below a
/// hole and the hole itself are parallel inertances, so the column is cut to
/// `x + L_d·a / (L_d + a)`, which lies in `[x, x + L_d]`.
pub fn effective_length(geometry: &PipeGeometry, end_correction: bool) -> f64 {
    let correction = open_end_correction(geometry.diameter);
    let mut length = geometry.length;

    if end_correction && geometry.ends.foot == End::Open {
        length += correction;
    }

    for hole in geometry.sorted_holes().iter().rev() {
        let below = length - hole.position;
        let a = hole_equivalent_length(hole, geometry);
        let cut = hole.position + below * a / (below + a);
        tracing::trace!(
            position = hole.position,
            diameter = hole.diameter,
            equivalent = a,
            from = length,
            to = cut,
            "side hole shortens column"
        );
        length = cut;
    }

    if end_correction && geometry.ends.mouth == End::Open {
        length += correction;
    }
    length
}

/// Lowest mode: `c / λ`, with λ set by the boundary rule.
pub fn fundamental(speed_of_sound: f64, length: f64, series: ModeSeries) -> f64 {
    speed_of_sound / series.fundamental_wavelength(length)
}

/// First `count` modes of the series built on `fundamental`.
pub fn harmonics(fundamental: f64, series: ModeSeries, count: usize) -> Vec<Harmonic> {
    (0..count)
        .map(|i| {
            let multiple = series.multiple(i);
            Harmonic {
                index: i + 1,
                multiple,
                frequency: multiple as f64 * fundamental,
            }
        })
        .collect()
}

/// Compute the full result. Inputs must already be validated.
pub(crate) fn resonate(
    geometry: &PipeGeometry,
    conditions: &EnvironmentalConditions,
    options: &ResonanceOptions,
) -> FrequencyResult {
    let c = speed_of_sound(conditions.temperature);
    let series = geometry.ends.series();

    let effective = effective_length(geometry, options.end_correction);
    let f0 = fundamental(c, effective, series);

    let open_bore = PipeGeometry {
        holes: Vec::new(),
        ..geometry.clone()
    };
    let f0_open_bore = fundamental(c, effective_length(&open_bore, options.end_correction), series);

    let modes = harmonics(f0, series, options.harmonics);
    let flow = excitation::analyse(conditions.air_speed, geometry.diameter, &modes);

    tracing::debug!(
        speed_of_sound = c,
        effective_length = effective,
        fundamental = f0,
        open_bore_fundamental = f0_open_bore,
        holes = geometry.holes.len(),
        "computed resonance"
    );

    FrequencyResult {
        speed_of_sound: c,
        effective_length: effective,
        wavelength: series.fundamental_wavelength(effective),
        fundamental: f0,
        open_bore_fundamental: f0_open_bore,
        harmonics: modes,
        flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Termination;
    use crate::{compute, compute_with};

    fn flute() -> PipeGeometry {
        PipeGeometry::new(0.6, 0.02, Termination::OPEN_OPEN)
    }

    #[test]
    fn test_no_holes_keeps_physical_length() {
        assert_eq!(effective_length(&flute(), false), 0.6);
    }

    #[test]
    fn test_single_hole_lumped_value() {
        // a = 0.6·d·(D/d)² = 0.6·0.008·6.25 = 0.03, L_d = 0.2
        // L_eff = 0.4 + 0.2·0.03/0.23
        let g = flute().with_hole(0.4, 0.008);
        let expected = 0.4 + 0.2 * 0.03 / 0.23;
        let got = effective_length(&g, false);
        assert!((got - expected).abs() < 1e-12, "L_eff = {got}, expected {expected}");
    }

    #[test]
    fn test_hole_never_lengthens_column() {
        for i in 0..=12 {
            let position = i as f64 * 0.05;
            let g = flute().with_hole(position, 0.006);
            let l = effective_length(&g, false);
            assert!(l <= 0.6 + 1e-12, "hole at {position}: L_eff = {l}");
            assert!(l >= position - 1e-12, "hole at {position}: L_eff = {l}");
        }
    }

    #[test]
    fn test_hole_at_foot_changes_nothing() {
        let g = flute().with_hole(0.6, 0.008);
        assert!((effective_length(&g, false) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_larger_hole_raises_fundamental() {
        let conditions = EnvironmentalConditions::default();
        let mut previous = compute(&flute(), &conditions).unwrap().fundamental;
        for d_mm in [2.0, 4.0, 8.0, 12.0, 16.0, 19.0] {
            let g = flute().with_hole(0.4, d_mm / 1000.0);
            let f0 = compute(&g, &conditions).unwrap().fundamental;
            assert!(f0 > previous, "d = {d_mm} mm: f0 = {f0} <= {previous}");
            previous = f0;
        }
    }

    #[test]
    fn test_thinner_bore_is_shortened_more() {
        let hole = SideHole::new(0.4, 0.005);
        let narrow = PipeGeometry {
            holes: vec![hole],
            ..PipeGeometry::new(0.6, 0.01, Termination::OPEN_OPEN)
        };
        let wide = PipeGeometry {
            holes: vec![hole],
            ..PipeGeometry::new(0.6, 0.03, Termination::OPEN_OPEN)
        };
        assert!(effective_length(&narrow, false) < effective_length(&wide, false));
    }

    #[test]
    fn test_each_extra_hole_only_shortens() {
        let mut g = flute();
        let mut previous = effective_length(&g, false);
        for position in [0.55, 0.5, 0.45, 0.4] {
            g = g.with_hole(position, 0.007);
            let l = effective_length(&g, false);
            assert!(l < previous, "adding hole at {position}: {l} >= {previous}");
            previous = l;
        }
    }

    #[test]
    fn test_hole_order_is_irrelevant() {
        let a = flute().with_hole(0.3, 0.008).with_hole(0.45, 0.006);
        let b = flute().with_hole(0.45, 0.006).with_hole(0.3, 0.008);
        assert_eq!(effective_length(&a, false), effective_length(&b, false));
    }

    #[test]
    fn test_open_bore_fundamental_reported_alongside() {
        let g = flute().with_hole(0.4, 0.008);
        let r = compute(&g, &EnvironmentalConditions::default()).unwrap();
        let plain = compute(&flute(), &EnvironmentalConditions::default()).unwrap();
        assert_eq!(r.open_bore_fundamental, plain.fundamental);
        assert!(r.fundamental > r.open_bore_fundamental);
    }

    #[test]
    fn test_end_correction_counts_open_ends() {
        let conditions = EnvironmentalConditions::default();
        let options = ResonanceOptions {
            end_correction: true,
            ..Default::default()
        };
        let delta = open_end_correction(0.02);

        for (ends, open) in [
            (Termination::OPEN_OPEN, 2.0),
            (Termination::OPEN_CLOSED, 1.0),
            (Termination::CLOSED_CLOSED, 0.0),
        ] {
            let g = PipeGeometry::new(0.6, 0.02, ends);
            let r = compute_with(&g, &conditions, &options).unwrap();
            let expected = 0.6 + open * delta;
            assert!(
                (r.effective_length - expected).abs() < 1e-12,
                "{ends:?}: L_eff = {}, expected {expected}",
                r.effective_length
            );
        }
    }

    #[test]
    fn test_harmonics_series() {
        let odd = harmonics(100.0, ModeSeries::Odd, 4);
        let freqs: Vec<f64> = odd.iter().map(|h| h.frequency).collect();
        assert_eq!(freqs, vec![100.0, 300.0, 500.0, 700.0]);
        assert_eq!(odd[3].multiple, 7);
        assert_eq!(odd[3].index, 4);
    }
}
