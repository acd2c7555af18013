//! Overhang Beam Analysis
//!
//! Statics for a beam on two supports with a cantilever past the second
//! support. Results are sampled at a fixed number of evenly spaced
//! positions so that every load category yields arrays of the same length.
//!
//! ```text
//!   A (pin)              B (roller)
//!   ▲────────────────────▲──────────── free end
//!   |<---- backspan ---->|<-- cantilever -->|
//!   x = 0                x = backspan        x = backspan + cantilever
//! ```
//!
//! ## Sign Convention
//! - Loads: positive downward (gravity), negative for uplift
//! - Reactions: positive upward
//! - Positive moment: tension on bottom fiber (sagging)
//! - Positive shear: resultant of forces left of the section acting upward
//!
//! ## Example
//! ```rust
//! use envelope_core::calculations::beam_analysis::{AppliedLoad, BeamSolver, OverhangBeam};
//!
//! // 8 m backspan, 2 m cantilever, 10 kN/m over the backspan
//! let beam = OverhangBeam::new(8.0, 2.0).with_sample_points(11);
//! let response = beam.solve(&[AppliedLoad::uniform(10.0, 0.0, 8.0)]).unwrap();
//!
//! assert!((response.reactions[0] - 40.0).abs() < 1e-9);
//! assert!((response.reactions[1] - 40.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};

/// Default number of sample positions along the beam
pub const DEFAULT_SAMPLE_POINTS: usize = 206;

/// Where a load sits on the beam (positions from support A)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadPlacement {
    /// Uniformly distributed load between two positions
    Uniform { start: f64, end: f64 },
    /// Concentrated load at a position
    Point { position: f64 },
}

/// A single load of one category applied to the beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedLoad {
    /// Id of the scenario load this comes from; the same in every category
    pub id: Uuid,
    /// Force per unit length for uniform loads, force for point loads
    pub magnitude: f64,
    pub placement: LoadPlacement,
}

impl AppliedLoad {
    /// Uniform load from `start` to `end`
    pub fn uniform(magnitude: f64, start: f64, end: f64) -> Self {
        AppliedLoad {
            id: Uuid::new_v4(),
            magnitude,
            placement: LoadPlacement::Uniform { start, end },
        }
    }

    /// Point load at `position`
    pub fn point(magnitude: f64, position: f64) -> Self {
        AppliedLoad {
            id: Uuid::new_v4(),
            magnitude,
            placement: LoadPlacement::Point { position },
        }
    }

    /// Resultant force and its position
    fn resultant(&self) -> (f64, f64) {
        match self.placement {
            LoadPlacement::Point { position } => (self.magnitude, position),
            LoadPlacement::Uniform { start, end } => (self.magnitude * (end - start), (start + end) / 2.0),
        }
    }

    /// Force and moment arm of the part of this load left of `x`
    fn left_of(&self, x: f64) -> (f64, f64) {
        match self.placement {
            LoadPlacement::Point { position } => {
                if x < position {
                    (0.0, 0.0)
                } else {
                    (self.magnitude, x - position)
                }
            }
            LoadPlacement::Uniform { start, end } => {
                let loaded = x.clamp(start, end) - start;
                (self.magnitude * loaded, x - start - loaded / 2.0)
            }
        }
    }
}

/// Response of the beam to the loads of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResponse {
    /// Sample positions from support A
    pub positions: Vec<f64>,
    /// Bending moment at each position
    pub moment: Vec<f64>,
    /// Shear at each position
    pub shear: Vec<f64>,
    /// Support reactions, in support order (A, B)
    pub reactions: Vec<f64>,
}

/// Anything that can turn a list of applied loads into sampled responses.
///
/// Implementations must return arrays of the same length for every call on
/// the same beam, because responses of different load categories are
/// combined position by position.
pub trait BeamSolver {
    fn solve(&self, loads: &[AppliedLoad]) -> CalcResult<BeamResponse>;
}

/// Beam pinned at x = 0, on a roller at x = backspan, free at the tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhangBeam {
    /// Distance between supports
    pub backspan: f64,
    /// Overhang past the second support
    pub cantilever: f64,
    /// Number of evenly spaced sample positions (including both ends)
    pub sample_points: usize,
}

impl OverhangBeam {
    pub fn new(backspan: f64, cantilever: f64) -> Self {
        OverhangBeam {
            backspan,
            cantilever,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }

    /// Set the number of sample positions
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.sample_points = points;
        self
    }

    /// Total length, support A to the free end
    pub fn length(&self) -> f64 {
        self.backspan + self.cantilever
    }

    /// Evenly spaced sample positions
    pub fn positions(&self) -> Vec<f64> {
        let n = self.sample_points;
        let length = self.length();
        (0..n).map(|i| length * i as f64 / (n - 1) as f64).collect()
    }

    /// Validate geometry
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.backspan > 0.0) || !self.backspan.is_finite() {
            return Err(CalcError::invalid_input("backspan", self.backspan.to_string(), "Backspan must be positive"));
        }
        if !(self.cantilever >= 0.0) || !self.cantilever.is_finite() {
            return Err(CalcError::invalid_input(
                "cantilever",
                self.cantilever.to_string(),
                "Cantilever cannot be negative",
            ));
        }
        if self.sample_points < 2 {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                "At least two sample points are required",
            ));
        }
        Ok(())
    }

    /// Validate that a load lies on the beam. Errors name the load by id.
    pub fn validate_load(&self, load: &AppliedLoad) -> CalcResult<()> {
        let length = self.length();
        let on_beam = |x: f64| (0.0..=length).contains(&x);
        let field = |name: &str| format!("{} of load {}", name, load.id);
        if !load.magnitude.is_finite() {
            return Err(CalcError::invalid_input(
                field("magnitude"),
                load.magnitude.to_string(),
                "Magnitude must be finite",
            ));
        }
        match load.placement {
            LoadPlacement::Point { position } if !on_beam(position) => Err(CalcError::invalid_input(
                field("position"),
                position.to_string(),
                format!("Point load must lie between 0 and {}", length),
            )),
            LoadPlacement::Uniform { start, end } if !(on_beam(start) && on_beam(end)) => Err(CalcError::invalid_input(
                field("start/end"),
                format!("{}..{}", start, end),
                format!("Uniform load must lie between 0 and {}", length),
            )),
            LoadPlacement::Uniform { start, end } if start > end => Err(CalcError::invalid_input(
                field("start/end"),
                format!("{}..{}", start, end),
                "Uniform load start must not exceed its end",
            )),
            _ => Ok(()),
        }
    }

    /// Support reactions (A, B) for one load, by moments about A
    fn reactions_for(&self, load: &AppliedLoad) -> (f64, f64) {
        let (force, position) = load.resultant();
        let r_b = force * position / self.backspan;
        (force - r_b, r_b)
    }
}

impl BeamSolver for OverhangBeam {
    fn solve(&self, loads: &[AppliedLoad]) -> CalcResult<BeamResponse> {
        self.validate()?;
        for load in loads {
            self.validate_load(load)?;
        }

        let (r_a, r_b) = loads
            .iter()
            .map(|load| self.reactions_for(load))
            .fold((0.0, 0.0), |(a, b), (da, db)| (a + da, b + db));

        let positions = self.positions();
        let mut shear = Vec::with_capacity(positions.len());
        let mut moment = Vec::with_capacity(positions.len());

        for &x in &positions {
            let (mut v, mut m) = (r_a, r_a * x);
            if x >= self.backspan {
                v += r_b;
                m += r_b * (x - self.backspan);
            }
            for load in loads {
                let (force, arm) = load.left_of(x);
                v -= force;
                m -= force * arm;
            }
            shear.push(v);
            moment.push(m);
        }

        debug!(loads = loads.len(), points = positions.len(), r_a, r_b, "solved overhang beam");

        Ok(BeamResponse {
            positions,
            moment,
            shear,
            reactions: vec![r_a, r_b],
        })
    }
}
