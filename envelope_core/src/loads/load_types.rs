//! Load category definitions
//!
//! The five load categories that every load vector and combination factor
//! vector is keyed by. Their order (D, L, S, W, E) is a contract: factor
//! vectors loaded from JSON are aligned positionally to it.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Load categories (D, L, S, W, E)
///
/// # Example
/// ```
/// use envelope_core::loads::LoadCategory;
///
/// let dead = LoadCategory::Dead;
/// assert_eq!(dead.code(), "D");
/// assert_eq!(dead.index(), 0);
/// assert_eq!(LoadCategory::from_code("E").unwrap(), LoadCategory::Earthquake);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadCategory {
    /// D - Dead load (self-weight of structure and permanent attachments)
    #[serde(rename = "D")]
    Dead,
    /// L - Live load (use and occupancy)
    #[serde(rename = "L")]
    Live,
    /// S - Snow load, including ice and associated rain
    #[serde(rename = "S")]
    Snow,
    /// W - Wind load
    #[serde(rename = "W")]
    Wind,
    /// E - Earthquake load
    #[serde(rename = "E")]
    Earthquake,
}

impl LoadCategory {
    /// All categories in the fixed vector order
    pub const ALL: [LoadCategory; 5] = [
        LoadCategory::Dead,
        LoadCategory::Live,
        LoadCategory::Snow,
        LoadCategory::Wind,
        LoadCategory::Earthquake,
    ];

    /// Standard abbreviation code (D, L, S, W, E)
    pub fn code(&self) -> &'static str {
        match self {
            LoadCategory::Dead => "D",
            LoadCategory::Live => "L",
            LoadCategory::Snow => "S",
            LoadCategory::Wind => "W",
            LoadCategory::Earthquake => "E",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadCategory::Dead => "Dead load",
            LoadCategory::Live => "Live load",
            LoadCategory::Snow => "Snow load",
            LoadCategory::Wind => "Wind load",
            LoadCategory::Earthquake => "Earthquake load",
        }
    }

    /// Position of this category in a load or factor vector
    pub fn index(&self) -> usize {
        match self {
            LoadCategory::Dead => 0,
            LoadCategory::Live => 1,
            LoadCategory::Snow => 2,
            LoadCategory::Wind => 3,
            LoadCategory::Earthquake => 4,
        }
    }

    /// Parse a category code.
    ///
    /// Anything other than the five codes is an `UnrecognizedCategory`
    /// error naming the code itself.
    pub fn from_code(code: &str) -> CalcResult<Self> {
        match code {
            "D" => Ok(LoadCategory::Dead),
            "L" => Ok(LoadCategory::Live),
            "S" => Ok(LoadCategory::Snow),
            "W" => Ok(LoadCategory::Wind),
            "E" => Ok(LoadCategory::Earthquake),
            other => Err(CalcError::unrecognized_category(other, other)),
        }
    }
}

impl std::fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
