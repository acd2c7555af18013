//! Load combination tables
//!
//! A [`CombinationTable`] is an ordered list of named combinations, each a
//! [`FactorVector`] aligned to (D, L, S, W, E). Tables are usually read from
//! a JSON object mapping names to five-element arrays:
//!
//! ```json
//! {
//!   "1.4D":        [1.4, 0.0, 0.0, 0.0, 0.0],
//!   "1.25D + 1.5L": [1.25, 1.5, 0.0, 0.0, 0.0]
//! }
//! ```
//!
//! Document order is preserved. It never changes an envelope value, but it
//! decides which combination is reported as governing when two tie.
//!
//! ## Wind sign convention
//!
//! The NBCC preset follows the convention of the occupancy presets: wind is
//! entered with its sign (negative for uplift) and factors are positive.
//! The ASCE 7 preset carries explicit `'` uplift variants with negative wind
//! factors, as the ASD/LRFD tables in US practice do.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::load_types::LoadCategory;
use crate::errors::{CalcError, CalcResult};

/// Factors for one combination, aligned to (D, L, S, W, E)
///
/// # Example
/// ```
/// use envelope_core::loads::{FactorVector, LoadCategory};
///
/// let factors = FactorVector::try_from(vec![1.25, 1.5, 0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(factors.get(LoadCategory::Live), 1.5);
///
/// // Anything but exactly five entries is rejected
/// assert!(FactorVector::try_from(vec![1.25, 1.5]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorVector(pub [f64; 5]);

impl FactorVector {
    pub fn new(d: f64, l: f64, s: f64, w: f64, e: f64) -> Self {
        FactorVector([d, l, s, w, e])
    }

    /// Factor for one category
    pub fn get(&self, category: LoadCategory) -> f64 {
        self.0[category.index()]
    }

    pub fn as_array(&self) -> &[f64; 5] {
        &self.0
    }

    /// Every factor negated
    pub fn negated(&self) -> Self {
        FactorVector(self.0.map(|f| -f))
    }

    /// Whether every factor is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|f| *f == 0.0)
    }

    /// Linear combination with one column of category values
    pub fn dot(&self, column: &[f64; 5]) -> f64 {
        self.0.iter().zip(column).map(|(f, v)| f * v).sum()
    }

    /// Human-readable equation, e.g. `1.25D + 1.5L - 0.4W`
    pub fn equation(&self) -> String {
        let mut out = String::new();
        for category in LoadCategory::ALL {
            let factor = self.get(category);
            if factor == 0.0 {
                continue;
            }
            let magnitude = factor.abs();
            let term = if magnitude == 1.0 {
                category.code().to_string()
            } else {
                format!("{}{}", magnitude, category.code())
            };
            match (out.is_empty(), factor < 0.0) {
                (true, false) => out.push_str(&term),
                (true, true) => out.push_str(&format!("-{}", term)),
                (false, false) => out.push_str(&format!(" + {}", term)),
                (false, true) => out.push_str(&format!(" - {}", term)),
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

impl TryFrom<&[f64]> for FactorVector {
    type Error = CalcError;

    fn try_from(values: &[f64]) -> CalcResult<Self> {
        let array: [f64; 5] = values
            .try_into()
            .map_err(|_| CalcError::shape_mismatch("factor vector", 5, values.len()))?;
        Ok(FactorVector(array))
    }
}

impl TryFrom<Vec<f64>> for FactorVector {
    type Error = CalcError;

    fn try_from(values: Vec<f64>) -> CalcResult<Self> {
        FactorVector::try_from(values.as_slice())
    }
}

impl From<[f64; 5]> for FactorVector {
    fn from(values: [f64; 5]) -> Self {
        FactorVector(values)
    }
}

/// A named load combination
///
/// # Example
/// ```
/// use envelope_core::loads::{LoadCombination, LoadCategory};
///
/// let combo = LoadCombination::new("NBCC-2a")
///     .with_factor(LoadCategory::Dead, 1.25)
///     .with_factor(LoadCategory::Live, 1.5);
///
/// assert_eq!(combo.equation(), "1.25D + 1.5L");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "NBCC-2a", "LRFD-4'")
    pub name: String,

    /// Factors aligned to (D, L, S, W, E)
    pub factors: FactorVector,
}

impl LoadCombination {
    /// Create a combination with every factor zero
    pub fn new(name: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            factors: FactorVector::default(),
        }
    }

    /// Set one factor (builder pattern)
    pub fn with_factor(mut self, category: LoadCategory, factor: f64) -> Self {
        self.factors.0[category.index()] = factor;
        self
    }

    /// Get the factor for one category
    pub fn get_factor(&self, category: LoadCategory) -> f64 {
        self.factors.get(category)
    }

    /// Human-readable equation for display
    pub fn equation(&self) -> String {
        self.factors.equation()
    }
}

/// An ordered, named set of load combinations
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationTable {
    name: String,
    combinations: Vec<LoadCombination>,
}

impl CombinationTable {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        CombinationTable {
            name: name.into(),
            combinations: Vec::new(),
        }
    }

    /// Add a combination (builder pattern).
    ///
    /// Returns an error if the name is already in the table.
    pub fn with_combination(mut self, name: impl Into<String>, factors: impl Into<FactorVector>) -> CalcResult<Self> {
        self.push(LoadCombination {
            name: name.into(),
            factors: factors.into(),
        })?;
        Ok(self)
    }

    /// Append a combination; names must be unique
    pub fn push(&mut self, combination: LoadCombination) -> CalcResult<()> {
        if self.get(&combination.name).is_some() {
            return Err(CalcError::invalid_input(
                format!("combinations.{}", self.name),
                combination.name,
                "Combination names must be unique",
            ));
        }
        self.combinations.push(combination);
        Ok(())
    }

    /// Parse a table from a JSON object of `name -> [D, L, S, W, E]`
    pub fn from_json_str(name: impl Into<String>, json: &str) -> CalcResult<Self> {
        let mut table: CombinationTable = serde_json::from_str(json)?;
        table.name = name.into();
        Ok(table)
    }

    /// Table name used in error messages and reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the table
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Combinations in table order
    pub fn iter(&self) -> impl Iterator<Item = &LoadCombination> {
        self.combinations.iter()
    }

    /// Look up a combination by name
    pub fn get(&self, name: &str) -> Option<&LoadCombination> {
        self.combinations.iter().find(|c| c.name == name)
    }

    /// Name of the combination at a row index (as returned by a trace)
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.combinations.get(index).map(|c| c.name.as_str())
    }

    /// All names in table order
    pub fn names(&self) -> Vec<&str> {
        self.combinations.iter().map(|c| c.name.as_str()).collect()
    }

    /// Same table with every factor negated
    pub fn negated(&self) -> Self {
        CombinationTable {
            name: format!("-{}", self.name),
            combinations: self
                .combinations
                .iter()
                .map(|c| LoadCombination {
                    name: c.name.clone(),
                    factors: c.factors.negated(),
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CombinationTable {
    type Item = &'a LoadCombination;
    type IntoIter = std::slice::Iter<'a, LoadCombination>;

    fn into_iter(self) -> Self::IntoIter {
        self.combinations.iter()
    }
}

impl Serialize for CombinationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.combinations.len()))?;
        for combo in &self.combinations {
            map.serialize_entry(&combo.name, &combo.factors)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = CombinationTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of combination names to [D, L, S, W, E] factor arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = CombinationTable::new("combinations");
        while let Some((name, values)) = access.next_entry::<String, Vec<f64>>()? {
            let factors = FactorVector::try_from(values.as_slice())
                .map_err(|e| de::Error::custom(format!("combination '{}': {}", name, e)))?;
            table
                .push(LoadCombination { name, factors })
                .map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for CombinationTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

fn preset(name: &str, rows: &[(&str, [f64; 5])]) -> CombinationTable {
    CombinationTable {
        name: name.to_string(),
        combinations: rows
            .iter()
            .map(|(combo, factors)| LoadCombination {
                name: combo.to_string(),
                factors: FactorVector(*factors),
            })
            .collect(),
    }
}

/// NBC 2015 Table 4.1.3.2.-A, expanded to explicit factor vectors
///
/// Each principal-load case is listed with the 1.25D and 0.9D alternatives
/// and with and without its companion load, so the envelope picks up the
/// counteracting-dead-load and no-companion cases.
///
/// # Example
/// ```
/// use envelope_core::loads::nbcc_2015_combinations;
///
/// let table = nbcc_2015_combinations();
/// assert_eq!(table.get("NBCC-2a").unwrap().equation(), "1.25D + 1.5L");
/// ```
pub fn nbcc_2015_combinations() -> CombinationTable {
    preset(
        "NBCC 2015",
        &[
            // 1. 1.4D
            ("NBCC-1", [1.4, 0.0, 0.0, 0.0, 0.0]),
            // 2. (1.25D or 0.9D) + 1.5L + (1.0S or 0.4W)
            ("NBCC-2a", [1.25, 1.5, 0.0, 0.0, 0.0]),
            ("NBCC-2b", [1.25, 1.5, 1.0, 0.0, 0.0]),
            ("NBCC-2c", [1.25, 1.5, 0.0, 0.4, 0.0]),
            ("NBCC-2d", [0.9, 1.5, 0.0, 0.0, 0.0]),
            ("NBCC-2e", [0.9, 1.5, 1.0, 0.0, 0.0]),
            ("NBCC-2f", [0.9, 1.5, 0.0, 0.4, 0.0]),
            // 3. (1.25D or 0.9D) + 1.5S + (1.0L or 0.4W)
            ("NBCC-3a", [1.25, 0.0, 1.5, 0.0, 0.0]),
            ("NBCC-3b", [1.25, 1.0, 1.5, 0.0, 0.0]),
            ("NBCC-3c", [1.25, 0.0, 1.5, 0.4, 0.0]),
            ("NBCC-3d", [0.9, 0.0, 1.5, 0.0, 0.0]),
            ("NBCC-3e", [0.9, 1.0, 1.5, 0.0, 0.0]),
            ("NBCC-3f", [0.9, 0.0, 1.5, 0.4, 0.0]),
            // 4. (1.25D or 0.9D) + 1.4W + (0.5L or 0.5S)
            ("NBCC-4a", [1.25, 0.0, 0.0, 1.4, 0.0]),
            ("NBCC-4b", [1.25, 0.5, 0.0, 1.4, 0.0]),
            ("NBCC-4c", [1.25, 0.0, 0.5, 1.4, 0.0]),
            ("NBCC-4d", [0.9, 0.0, 0.0, 1.4, 0.0]),
            ("NBCC-4e", [0.9, 0.5, 0.0, 1.4, 0.0]),
            ("NBCC-4f", [0.9, 0.0, 0.5, 1.4, 0.0]),
            // 5. 1.0D + 1.0E + 0.5L + 0.25S
            ("NBCC-5a", [1.0, 0.0, 0.0, 0.0, 1.0]),
            ("NBCC-5b", [1.0, 0.5, 0.25, 0.0, 1.0]),
        ],
    )
}

/// ASCE 7-10 LRFD combinations (Section 2.3.1) restricted to D, L, S, W, E
///
/// Roof live and rain terms are dropped; wind uplift variants are marked
/// with `'`.
pub fn asce7_lrfd_combinations() -> CombinationTable {
    preset(
        "ASCE 7-10 LRFD",
        &[
            ("LRFD-1", [1.4, 0.0, 0.0, 0.0, 0.0]),
            ("LRFD-2", [1.2, 1.6, 0.5, 0.0, 0.0]),
            ("LRFD-3a", [1.2, 1.0, 1.6, 0.0, 0.0]),
            ("LRFD-3b", [1.2, 0.0, 1.6, 0.5, 0.0]),
            ("LRFD-3b'", [1.2, 0.0, 1.6, -0.5, 0.0]),
            ("LRFD-4", [1.2, 1.0, 0.5, 1.0, 0.0]),
            ("LRFD-4'", [1.2, 1.0, 0.5, -1.0, 0.0]),
            ("LRFD-5", [1.2, 1.0, 0.2, 0.0, 1.0]),
            ("LRFD-6", [0.9, 0.0, 0.0, 1.0, 0.0]),
            ("LRFD-6'", [0.9, 0.0, 0.0, -1.0, 0.0]),
            ("LRFD-7", [0.9, 0.0, 0.0, 0.0, 1.0]),
        ],
    )
}
