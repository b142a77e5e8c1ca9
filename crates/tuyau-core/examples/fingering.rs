//! Fingering table for a six-hole whistle.
//!
//! Opens the holes one at a time from the foot upward and prints the
//! fundamental of each fingering, next to the transfer-matrix resonance.
//!
//! Run with:
//!   cargo run -p tuyau-core --example fingering

use tuyau_core::{impedance, EnvironmentalConditions, PipeGeometry, Termination};

fn main() -> tuyau_core::Result<()> {
    println!("=== Six-hole whistle ===");

    let holes = [
        (0.225, 0.0070),
        (0.200, 0.0075),
        (0.175, 0.0070),
        (0.145, 0.0065),
        (0.120, 0.0070),
        (0.095, 0.0060),
    ];
    let conditions = EnvironmentalConditions::new(20.0, 5.0);

    let mut geometry = PipeGeometry::new(0.30, 0.013, Termination::OPEN_OPEN);
    for open in 0..=holes.len() {
        if open > 0 {
            let (position, diameter) = holes[open - 1];
            geometry = geometry.with_hole(position, diameter);
        }

        let result = tuyau_core::compute(&geometry, &conditions)?;
        let scanned = impedance::scan(&geometry, &conditions, false, 2500.0, 1.0)?;
        println!(
            "{open} open: lumped {:>7.1} Hz, transfer matrix {:>7.1} Hz, L_eff {:>5.1} mm",
            result.fundamental,
            scanned.first().copied().unwrap_or(f64::NAN),
            result.effective_length * 1000.0
        );
    }

    Ok(())
}
