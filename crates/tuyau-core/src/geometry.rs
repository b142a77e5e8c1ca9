use serde::{Deserialize, Serialize};

use crate::constants::area_from_diameter;
use crate::error::{ensure_positive, Error, Result};

/// Boundary condition at one end of the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum End {
    Open,
    Closed,
}

/// Boundary conditions at both ends. The mouth sits at position 0, the foot
/// at the far end of the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub mouth: End,
    pub foot: End,
}

/// Which integer multiples of the fundamental the pipe supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSeries {
    /// Equal ends: every integer multiple, λ = 2·L.
    All,
    /// Mixed ends: odd multiples only, λ = 4·L.
    Odd,
}

impl Termination {
    pub const OPEN_OPEN: Termination = Termination {
        mouth: End::Open,
        foot: End::Open,
    };
    pub const OPEN_CLOSED: Termination = Termination {
        mouth: End::Open,
        foot: End::Closed,
    };
    pub const CLOSED_OPEN: Termination = Termination {
        mouth: End::Closed,
        foot: End::Open,
    };
    pub const CLOSED_CLOSED: Termination = Termination {
        mouth: End::Closed,
        foot: End::Closed,
    };

    pub fn series(&self) -> ModeSeries {
        if self.mouth == self.foot {
            ModeSeries::All
        } else {
            ModeSeries::Odd
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::OPEN_OPEN
    }
}

impl ModeSeries {
    /// Wavelength of the fundamental for a column of length `length`.
    pub fn fundamental_wavelength(&self, length: f64) -> f64 {
        match self {
            ModeSeries::All => 2.0 * length,
            ModeSeries::Odd => 4.0 * length,
        }
    }

    /// Multiplier of the fundamental for the `i`-th mode (0-based).
    /// Saturates at `u32::MAX` for indices far beyond any listed mode.
    pub fn multiple(&self, i: usize) -> u32 {
        let m = match self {
            ModeSeries::All => i.saturating_add(1),
            ModeSeries::Odd => i.saturating_mul(2).saturating_add(1),
        };
        u32::try_from(m).unwrap_or(u32::MAX)
    }
}

/// A lateral opening in the pipe wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideHole {
    /// Distance from the mouth in metres.
    pub position: f64,
    /// Hole diameter in metres.
    pub diameter: f64,
}

impl SideHole {
    pub fn new(position: f64, diameter: f64) -> Self {
        Self { position, diameter }
    }

    pub fn area(&self) -> f64 {
        area_from_diameter(self.diameter)
    }
}

/// Geometry of the resonator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeGeometry {
    /// Length in metres.
    pub length: f64,
    /// Inner diameter in metres.
    pub diameter: f64,
    #[serde(default)]
    pub ends: Termination,
    #[serde(default)]
    pub holes: Vec<SideHole>,
}

impl Default for PipeGeometry {
    fn default() -> Self {
        Self {
            length: 1.0,    // 1000 mm
            diameter: 0.05, // 50 mm
            ends: Termination::OPEN_OPEN,
            holes: Vec::new(),
        }
    }
}

impl PipeGeometry {
    pub fn new(length: f64, diameter: f64, ends: Termination) -> Self {
        Self {
            length,
            diameter,
            ends,
            holes: Vec::new(),
        }
    }

    pub fn with_hole(mut self, position: f64, diameter: f64) -> Self {
        self.holes.push(SideHole::new(position, diameter));
        self
    }

    /// Cross-sectional area in m².
    pub fn area(&self) -> f64 {
        area_from_diameter(self.diameter)
    }

    /// Holes ordered from the mouth toward the foot.
    pub fn sorted_holes(&self) -> Vec<SideHole> {
        let mut holes = self.holes.clone();
        holes.sort_by(|a, b| a.position.total_cmp(&b.position));
        holes
    }

    /// Index into `holes` of the hole nearest the mouth.
    pub fn first_hole_index(&self) -> Option<usize> {
        self.holes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.position.total_cmp(&b.position))
            .map(|(i, _)| i)
    }

    /// Check every geometric invariant.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("length", self.length)?;
        ensure_positive("diameter", self.diameter)?;

        for (i, hole) in self.holes.iter().enumerate() {
            if !hole.position.is_finite() || hole.position < 0.0 || hole.position > self.length {
                return Err(Error::invalid(
                    format!("holes[{i}].position"),
                    format!(
                        "must be within [0, {}] (pipe length), got {}",
                        self.length, hole.position
                    ),
                ));
            }
            let field = format!("holes[{i}].diameter");
            ensure_positive(&field, hole.diameter)?;
            if hole.diameter >= self.diameter {
                return Err(Error::invalid(
                    field,
                    format!(
                        "must be smaller than the pipe diameter {}, got {}",
                        self.diameter, hole.diameter
                    ),
                ));
            }
        }
        Ok(())
    }
}
