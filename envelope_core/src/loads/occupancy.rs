//! Occupancy presets
//!
//! Unit loads (kPa) per load category for common occupancies. A preset is
//! turned into a line or point load by scaling it with a tributary width or
//! area before it is applied to a beam.
//!
//! # JSON Format
//! ```json
//! [
//!   { "name": "Office", "unit_loads": { "D": 3.6, "L": 2.4 } },
//!   { "name": "Roof",   "unit_loads": { "D": 0.9, "L": 1.0, "S": 1.4, "W": -1.2 } }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use super::load_vector::LoadVector;
use crate::errors::{CalcError, CalcResult};

/// A named set of unit loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pub name: String,
    /// Load per unit tributary width/area, by category
    pub unit_loads: LoadVector<f64>,
}

impl Occupancy {
    pub fn new(name: impl Into<String>, unit_loads: LoadVector<f64>) -> Self {
        Occupancy {
            name: name.into(),
            unit_loads,
        }
    }
}

/// Ordered collection of occupancy presets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupancyTable(Vec<Occupancy>);

impl OccupancyTable {
    pub fn new() -> Self {
        OccupancyTable(Vec::new())
    }

    /// Add a preset (builder pattern); names must be unique
    pub fn with_occupancy(mut self, occupancy: Occupancy) -> CalcResult<Self> {
        if self.find(&occupancy.name).is_some() {
            return Err(CalcError::invalid_input(
                "occupancies",
                occupancy.name,
                "Occupancy names must be unique",
            ));
        }
        self.0.push(occupancy);
        Ok(self)
    }

    /// Parse presets from JSON, rejecting duplicate names
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let parsed: Vec<Occupancy> = serde_json::from_str(json)?;
        parsed
            .into_iter()
            .try_fold(OccupancyTable::new(), |table, occupancy| table.with_occupancy(occupancy))
    }

    fn find(&self, name: &str) -> Option<&Occupancy> {
        self.0.iter().find(|o| o.name == name)
    }

    /// Look up a preset by name
    pub fn get(&self, name: &str) -> CalcResult<&Occupancy> {
        self.find(name)
            .ok_or_else(|| CalcError::occupancy_not_found(name))
    }

    /// Unit loads of `name` scaled by a tributary width or area
    pub fn service_load(&self, name: &str, tributary: f64) -> CalcResult<LoadVector<f64>> {
        Ok(self.get(name)?.unit_loads.scaled(tributary))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occupancy> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Default presets (kPa)
///
/// # Example
/// ```
/// use envelope_core::loads::default_occupancies;
///
/// let presets = default_occupancies();
/// let office = presets.service_load("Office", 2.0).unwrap();
/// assert!((office.d - 7.2).abs() < 1e-12);
/// ```
pub fn default_occupancies() -> OccupancyTable {
    let rows: [(&str, [f64; 5]); 6] = [
        ("Residential", [1.2, 2.4, 0.0, 0.0, 0.0]),
        ("Office", [3.6, 2.4, 0.0, 0.0, 0.0]),
        ("Roof", [0.9, 1.0, 1.4, -1.2, 0.0]),
        ("Amenity Roof", [0.9, 4.8, 1.4, -1.2, 0.0]),
        ("Exterior Cladding", [1.8, 0.0, 0.0, 0.0, 0.0]),
        ("Rooftop Mech", [8.5, 0.0, 0.0, 0.0, 0.0]),
    ];
    OccupancyTable(
        rows.into_iter()
            .map(|(name, loads)| Occupancy::new(name, LoadVector::from(loads)))
            .collect(),
    )
}
