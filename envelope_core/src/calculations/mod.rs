//! # Beam Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, config) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`beam_analysis`] - Per-category statics of a backspan + cantilever beam
//! - [`overhang_beam`] - Factored design envelopes for that beam

pub mod beam_analysis;
pub mod overhang_beam;

// Re-export commonly used types
pub use beam_analysis::{AppliedLoad, BeamResponse, BeamSolver, LoadPlacement, OverhangBeam};
pub use overhang_beam::{
    analyze_by_category,
    calculate,
    combination_diagram,
    design_envelopes,
    CombinationDiagram,
    DesignEnvelopes,
    LoadSource,
    OverhangBeamInput,
    OverhangBeamResult,
    ResolvedLoad,
    ResponseSet,
    ServiceLoad,
};
