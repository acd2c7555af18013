//! Alias loads
//!
//! Project drawings rarely say "D" or "L"; they say "roof_DL", "mech_unit",
//! "partitions". An [`AliasLookup`] maps those names onto load categories so
//! a list of named loads can be collapsed into one [`LoadVector`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::load_types::LoadCategory;
use super::load_vector::{Component, LoadVector};
use crate::errors::{CalcError, CalcResult};

/// Map of alias name to category code (`"D"`, `"L"`, `"S"`, `"W"`, `"E"`)
///
/// # JSON Format
/// ```json
/// { "roof_DL": "D", "mech_DL": "D", "roof_SL": "S" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasLookup(BTreeMap<String, String>);

impl AliasLookup {
    pub fn new() -> Self {
        AliasLookup(BTreeMap::new())
    }

    /// Add an alias (builder pattern)
    pub fn with_alias(mut self, alias: impl Into<String>, code: impl Into<String>) -> Self {
        self.0.insert(alias.into(), code.into());
        self
    }

    /// Category code for a load name; names without an entry resolve to
    /// themselves so canonical codes can be used directly.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collapse named loads into a service load vector.
///
/// Each name is resolved through `alias_lookup`; magnitudes that land in the
/// same category are summed. Categories with no contributions are zero. A
/// name that resolves to anything other than D, L, S, W or E is an
/// `UnrecognizedCategory` error.
///
/// # Example
/// ```
/// use envelope_core::loads::{alias_to_service_loads, AliasLookup, LoadVector};
///
/// let lookup = AliasLookup::new()
///     .with_alias("roof_DL", "D")
///     .with_alias("mech_DL", "D");
///
/// let service: LoadVector = alias_to_service_loads(
///     [("roof_DL", 5.0), ("mech_DL", 3.0), ("L", 2.0)],
///     &lookup,
/// )?;
/// assert_eq!(service, LoadVector::new(8.0, 2.0, 0.0, 0.0, 0.0));
/// # Ok::<(), envelope_core::errors::CalcError>(())
/// ```
pub fn alias_to_service_loads<T, K, I>(alias_loads: I, alias_lookup: &AliasLookup) -> CalcResult<LoadVector<T>>
where
    T: Component,
    K: AsRef<str>,
    I: IntoIterator<Item = (K, T)>,
{
    let mut totals: [Option<T>; 5] = Default::default();

    for (name, magnitude) in alias_loads {
        let name = name.as_ref();
        let code = alias_lookup.resolve(name);
        let category = LoadCategory::from_code(code)
            .map_err(|_| CalcError::unrecognized_category(name, code))?;

        let slot = &mut totals[category.index()];
        *slot = Some(match slot.take() {
            Some(existing) => existing.try_add(&magnitude)?,
            None => magnitude,
        });
    }

    Ok(LoadVector::from_fn(|category| {
        totals[category.index()].take().unwrap_or_default()
    }))
}
