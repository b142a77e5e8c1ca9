//! Text and JSON rendering of a calculation.

use std::fmt::Write;

use serde::Serialize;
use tuyau_core::sweep::SweepPoint;
use tuyau_core::FrequencyResult;

use crate::cli::SweepArg;
use crate::config::Scenario;

/// A sweep converted to display units.
#[derive(Debug, Clone, Serialize)]
pub struct SweepTable {
    pub label: &'static str,
    pub points: Vec<SweepPoint>,
}

impl SweepTable {
    pub fn new(arg: SweepArg, scenario: &Scenario, points: Vec<SweepPoint>) -> Self {
        let points = points
            .into_iter()
            .map(|p| SweepPoint {
                value: arg.from_si(p.value, &scenario.geometry),
                fundamental: p.fundamental,
            })
            .collect();
        Self {
            label: arg.label(),
            points,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub scenario: Scenario,
    pub result: FrequencyResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impedance_resonances: Option<Vec<f64>>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let s = &self.scenario;
        let r = &self.result;

        writeln!(
            out,
            "Speed of sound at {} °C: {:.2} m/s",
            s.conditions.temperature, r.speed_of_sound
        )?;
        writeln!(out, "Effective length: {:.1} mm", r.effective_length * 1000.0)?;

        if s.geometry.holes.is_empty() {
            writeln!(out, "Fundamental: {:.2} Hz", r.fundamental)?;
        } else {
            writeln!(out, "Fundamental (with holes): {:.2} Hz", r.fundamental)?;
            writeln!(out, "Fundamental (without holes): {:.2} Hz", r.open_bore_fundamental)?;
            writeln!(out, "Difference: {:.2} Hz", r.fundamental - r.open_bore_fundamental)?;
        }

        writeln!(out, "Harmonics:")?;
        for h in &r.harmonics {
            writeln!(out, "   Harmonic {} (×{}): {:.2} Hz", h.index, h.multiple, h.frequency)?;
        }

        writeln!(
            out,
            "Air flow {:.0} km/h: shedding at {:.2} Hz, nearest mode {} (ratio {:.2})",
            s.conditions.air_speed * 3.6,
            r.flow.shedding_frequency,
            r.flow.nearest_mode,
            r.flow.detuning
        )?;

        if let Some(found) = &self.impedance_resonances {
            let list: Vec<String> = found.iter().map(|f| format!("{f:.1}")).collect();
            writeln!(out, "Impedance scan resonances (Hz): {}", list.join(", "))?;
        }

        if let Some(table) = &self.sweep {
            writeln!(out)?;
            writeln!(out, "{:>24}  {:>14}", table.label, "Fundamental (Hz)")?;
            for p in &table.points {
                writeln!(out, "{:>24.2}  {:>14.2}", p.value, p.fundamental)?;
            }
        }
        Ok(())
    }
}
