//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tuyau_core::sweep::SweepParameter;
use tuyau_core::{PipeGeometry, Termination};

/// Command line arguments. Lengths are in millimetres and speeds in km/h;
/// everything is converted to SI before it reaches the calculator.
#[derive(Parser, Debug)]
#[command(name = "tuyau")]
#[command(about = "Acoustic resonance frequencies of a pipe with side holes", long_about = None)]
pub struct Args {
    /// JSON scenario (geometry, conditions, options in SI units). Flags given
    /// below override its values; a new length keeps the file's holes at the
    /// same fraction of the pipe.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pipe length
    #[arg(long, value_name = "MM")]
    pub length_mm: Option<f64>,

    /// Pipe inner diameter
    #[arg(long, value_name = "MM")]
    pub diameter_mm: Option<f64>,

    /// Air temperature
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Air flow speed across the mouth
    #[arg(long, value_name = "KMH")]
    pub air_speed_kmh: Option<f64>,

    /// Boundary conditions, mouth first
    #[arg(long, value_enum)]
    pub ends: Option<EndsArg>,

    /// Side hole as POSITION:DIAMETER, position in % of the length from the
    /// mouth and diameter in mm. Repeat for several holes.
    #[arg(long = "hole", value_name = "PCT:MM", value_parser = parse_hole)]
    pub holes: Vec<HoleArg>,

    /// Number of modes to list
    #[arg(long, value_name = "N")]
    pub harmonics: Option<usize>,

    /// Apply the open-end radiation correction
    #[arg(long)]
    pub end_correction: bool,

    /// Print the fundamental while varying one parameter
    #[arg(long, value_enum, value_name = "PARAMETER")]
    pub sweep: Option<SweepArg>,

    /// Sweep start, in the parameter's display unit
    #[arg(long, allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Sweep end, in the parameter's display unit
    #[arg(long, allow_negative_numbers = true)]
    pub to: Option<f64>,

    /// Number of sweep points
    #[arg(long, default_value_t = 100)]
    pub steps: usize,

    /// Cross-check with a transfer-matrix impedance scan
    #[arg(long)]
    pub impedance: bool,

    /// Upper frequency of the impedance scan
    #[arg(long, value_name = "HZ", default_value_t = 3000.0)]
    pub max_frequency: f64,

    /// Print JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndsArg {
    OpenOpen,
    OpenClosed,
    ClosedOpen,
    ClosedClosed,
}

impl From<EndsArg> for Termination {
    fn from(ends: EndsArg) -> Self {
        match ends {
            EndsArg::OpenOpen => Termination::OPEN_OPEN,
            EndsArg::OpenClosed => Termination::OPEN_CLOSED,
            EndsArg::ClosedOpen => Termination::CLOSED_OPEN,
            EndsArg::ClosedClosed => Termination::CLOSED_CLOSED,
        }
    }
}

/// A hole as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleArg {
    /// Position in percent of the pipe length.
    pub position_pct: f64,
    /// Diameter in millimetres.
    pub diameter_mm: f64,
}

fn parse_hole(s: &str) -> Result<HoleArg, String> {
    let (pos, diam) = s
        .split_once(':')
        .ok_or_else(|| format!("expected POSITION:DIAMETER, got '{s}'"))?;
    let position_pct = pos
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad hole position '{pos}': {e}"))?;
    let diameter_mm = diam
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad hole diameter '{diam}': {e}"))?;
    Ok(HoleArg {
        position_pct,
        diameter_mm,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepArg {
    Length,
    Diameter,
    AirSpeed,
    Temperature,
    FirstHole,
}

impl SweepArg {
    pub fn parameter(&self) -> SweepParameter {
        match self {
            SweepArg::Length => SweepParameter::Length,
            SweepArg::Diameter => SweepParameter::Diameter,
            SweepArg::AirSpeed => SweepParameter::AirSpeed,
            SweepArg::Temperature => SweepParameter::Temperature,
            SweepArg::FirstHole => SweepParameter::FirstHolePosition,
        }
    }

    /// Axis label in display units.
    pub fn label(&self) -> &'static str {
        match self {
            SweepArg::Length => "Length (mm)",
            SweepArg::Diameter => "Diameter (mm)",
            SweepArg::AirSpeed => "Air speed (km/h)",
            SweepArg::Temperature => "Temperature (°C)",
            SweepArg::FirstHole => "First hole (% of length)",
        }
    }

    /// Default range in display units.
    pub fn default_range(&self, geometry: &PipeGeometry) -> (f64, f64) {
        match self {
            SweepArg::Length => (100.0, 10_000.0),
            SweepArg::Diameter => {
                // Stay wider than the widest hole.
                let widest = geometry
                    .holes
                    .iter()
                    .map(|h| h.diameter * 1000.0)
                    .fold(0.0, f64::max);
                (f64::max(5.0, widest + 1.0), 500.0)
            }
            SweepArg::AirSpeed => (1.0, 180.0),
            SweepArg::Temperature => (-20.0, 50.0),
            SweepArg::FirstHole => (5.0, 95.0),
        }
    }

    /// Convert a display value to SI.
    pub fn to_si(&self, value: f64, geometry: &PipeGeometry) -> f64 {
        match self {
            SweepArg::Length | SweepArg::Diameter => value / 1000.0,
            SweepArg::AirSpeed => value / 3.6,
            SweepArg::Temperature => value,
            SweepArg::FirstHole => value / 100.0 * geometry.length,
        }
    }

    /// Convert an SI value back to display units.
    pub fn from_si(&self, value: f64, geometry: &PipeGeometry) -> f64 {
        match self {
            SweepArg::Length | SweepArg::Diameter => value * 1000.0,
            SweepArg::AirSpeed => value * 3.6,
            SweepArg::Temperature => value,
            SweepArg::FirstHole => value / geometry.length * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hole() {
        assert_eq!(
            parse_hole("25:10").unwrap(),
            HoleArg {
                position_pct: 25.0,
                diameter_mm: 10.0
            }
        );
        assert_eq!(parse_hole(" 40.5 : 6.5 ").unwrap().position_pct, 40.5);
        assert!(parse_hole("25").is_err());
        assert!(parse_hole("a:1").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "tuyau",
            "--length-mm",
            "500",
            "--temperature",
            "-10",
            "--ends",
            "open-closed",
            "--hole",
            "25:10",
            "--hole",
            "35:10",
            "--sweep",
            "first-hole",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.length_mm, Some(500.0));
        assert_eq!(args.temperature, Some(-10.0));
        assert_eq!(args.ends, Some(EndsArg::OpenClosed));
        assert_eq!(args.holes.len(), 2);
        assert_eq!(args.sweep, Some(SweepArg::FirstHole));
        assert_eq!(args.steps, 100);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_sweep_units_round_trip() {
        let g = PipeGeometry::default();
        for arg in [SweepArg::Length, SweepArg::AirSpeed, SweepArg::FirstHole] {
            let v = 42.0;
            let back = arg.from_si(arg.to_si(v, &g), &g);
            assert!((back - v).abs() < 1e-9, "{arg:?}: {back}");
        }
    }

    #[test]
    fn test_diameter_range_clears_widest_hole() {
        let g = PipeGeometry::default().with_hole(0.3, 0.012);
        let (start, _) = SweepArg::Diameter.default_range(&g);
        assert!((start - 13.0).abs() < 1e-9, "start = {start}");
    }
}
