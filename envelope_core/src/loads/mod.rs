//! Load vectors, combination tables and the load factoring engine
//!
//! # Overview
//!
//! - [`LoadCategory`] - the five load categories (D, L, S, W, E)
//! - [`LoadVector`] - one value per category, scalar or sampled ([`Series`])
//! - [`CombinationTable`] - named factor vectors, in document order
//! - [`factored_max`], [`factored_min`], [`envelope`] - the factoring engine
//! - [`alias_to_service_loads`] - collapse named loads into categories
//! - [`OccupancyTable`] - unit-load presets by occupancy
//!
//! # Example
//!
//! ```
//! use envelope_core::loads::{LoadVector, CombinationPreset, factored_max};
//!
//! // Service loads for an office floor beam, 3 m tributary width
//! let line_load = LoadVector { d: 3.6, l: 2.4, ..Default::default() } * 3.0;
//!
//! let table = CombinationPreset::Nbcc2015.combinations();
//! let governing = factored_max(&line_load, &table)?;
//! assert!((governing - 24.3).abs() < 1e-9); // 1.25D + 1.5L
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

pub mod alias;
pub mod combinations;
pub mod factoring;
pub mod load_types;
pub mod load_vector;
pub mod occupancy;

pub use alias::{alias_to_service_loads, AliasLookup};
pub use combinations::{
    asce7_lrfd_combinations,
    nbcc_2015_combinations,
    CombinationTable,
    FactorVector,
    LoadCombination,
};
pub use factoring::{
    envelope,
    factor_column,
    factored_matrix,
    factored_max,
    factored_max_trace,
    factored_min,
    factored_min_trace,
    Envelope,
    FactoredMatrix,
};
pub use load_types::LoadCategory;
pub use load_vector::{Component, LoadVector, Series};
pub use occupancy::{default_occupancies, Occupancy, OccupancyTable};

use serde::{Deserialize, Serialize};

/// Built-in combination tables
///
/// Used when no combination file is supplied.
///
/// # Example
/// ```
/// use envelope_core::loads::CombinationPreset;
///
/// let preset = CombinationPreset::default();
/// assert_eq!(preset.code(), "NBCC");
/// assert!(!preset.combinations().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombinationPreset {
    /// National Building Code of Canada 2015, Table 4.1.3.2.-A
    #[default]
    Nbcc2015,
    /// ASCE 7-10 strength design (LRFD), Section 2.3.1
    Asce7Lrfd,
}

impl CombinationPreset {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CombinationPreset::Nbcc2015 => "NBC 2015 (ULS, Table 4.1.3.2.-A)",
            CombinationPreset::Asce7Lrfd => "ASCE 7-10 LRFD",
        }
    }

    /// Short code
    pub fn code(&self) -> &'static str {
        match self {
            CombinationPreset::Nbcc2015 => "NBCC",
            CombinationPreset::Asce7Lrfd => "LRFD",
        }
    }

    /// The combination table for this preset
    pub fn combinations(&self) -> CombinationTable {
        match self {
            CombinationPreset::Nbcc2015 => nbcc_2015_combinations(),
            CombinationPreset::Asce7Lrfd => asce7_lrfd_combinations(),
        }
    }
}

impl std::fmt::Display for CombinationPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
