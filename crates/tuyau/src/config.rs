//! Scenario loading: JSON file first, then command-line overrides.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tuyau_core::{EnvironmentalConditions, PipeGeometry, ResonanceOptions, SideHole};

use crate::cli::Args;

/// Everything one calculation needs, in SI units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub geometry: PipeGeometry,
    pub conditions: EnvironmentalConditions,
    pub options: ResonanceOptions,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario file {}", path.display()))?;
        let scenario: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse scenario file {}", path.display()))?;
        tracing::info!("loaded scenario from {}", path.display());
        Ok(scenario)
    }

    /// Build the scenario from the optional config file and the flags.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut scenario = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        scenario.apply(args);
        tracing::debug!(?scenario, "resolved scenario");
        Ok(scenario)
    }

    /// Override fields with whatever was given on the command line.
    ///
    /// A new length keeps existing holes at the same fraction of the pipe,
    /// the way `--hole` percentages and the length sweep place them.
    pub fn apply(&mut self, args: &Args) {
        let g = &mut self.geometry;
        if let Some(mm) = args.length_mm {
            let length = mm / 1000.0;
            if g.length > 0.0 && g.length.is_finite() {
                let scale = length / g.length;
                for hole in &mut g.holes {
                    hole.position *= scale;
                }
            }
            g.length = length;
        }
        if let Some(mm) = args.diameter_mm {
            g.diameter = mm / 1000.0;
        }
        if let Some(ends) = args.ends {
            g.ends = ends.into();
        }
        if !args.holes.is_empty() {
            let length = g.length;
            g.holes = args
                .holes
                .iter()
                .map(|h| SideHole::new(h.position_pct / 100.0 * length, h.diameter_mm / 1000.0))
                .collect();
        }

        if let Some(t) = args.temperature {
            self.conditions.temperature = t;
        }
        if let Some(kmh) = args.air_speed_kmh {
            self.conditions.air_speed = kmh / 3.6;
        }

        if let Some(n) = args.harmonics {
            self.options.harmonics = n;
        }
        if args.end_correction {
            self.options.end_correction = true;
        }
    }
}
