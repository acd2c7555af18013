//! # Configuration
//!
//! The read-only inputs every calculation needs: the combination table, the
//! occupancy presets and the alias lookup. A [`Config`] is built once at
//! startup, from the built-in presets or from JSON files, and passed by
//! reference into each calculation. There is no process-wide state.
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::config::Config;
//! use envelope_core::loads::CombinationPreset;
//!
//! let config = Config::builtin(CombinationPreset::Asce7Lrfd);
//! assert_eq!(config.combinations.name(), "ASCE 7-10 LRFD");
//! assert!(config.occupancies.get("Office").is_ok());
//! ```

use std::path::Path;

use tracing::info;

use crate::errors::CalcResult;
use crate::file_io::{load_alias_lookup, load_combination_table, load_occupancy_table};
use crate::loads::{default_occupancies, AliasLookup, CombinationPreset, CombinationTable, OccupancyTable};

/// Inputs shared by every calculation in a session
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub combinations: CombinationTable,
    pub occupancies: OccupancyTable,
    pub aliases: AliasLookup,
}

/// Optional file overrides for [`Config::load`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSources<'a> {
    pub combinations: Option<&'a Path>,
    pub occupancies: Option<&'a Path>,
    pub aliases: Option<&'a Path>,
}

impl Config {
    /// Built-in combinations for `preset`, default occupancies, no aliases
    pub fn builtin(preset: CombinationPreset) -> Self {
        Config {
            combinations: preset.combinations(),
            occupancies: default_occupancies(),
            aliases: AliasLookup::new(),
        }
    }

    /// Built-in configuration with any of its parts replaced by files
    pub fn load(preset: CombinationPreset, sources: ConfigSources<'_>) -> CalcResult<Self> {
        let mut config = Config::builtin(preset);
        if let Some(path) = sources.combinations {
            config.combinations = load_combination_table(path)?;
        }
        if let Some(path) = sources.occupancies {
            config.occupancies = load_occupancy_table(path)?;
        }
        if let Some(path) = sources.aliases {
            config.aliases = load_alias_lookup(path)?;
        }
        info!(
            preset = preset.display_name(),
            combinations = config.combinations.name(),
            rows = config.combinations.len(),
            occupancies = config.occupancies.len(),
            aliases = config.aliases.len(),
            "configuration ready"
        );
        Ok(config)
    }

    /// Replace the combination table (builder pattern)
    pub fn with_combinations(mut self, combinations: CombinationTable) -> Self {
        self.combinations = combinations;
        self
    }

    /// Replace the alias lookup (builder pattern)
    pub fn with_aliases(mut self, aliases: AliasLookup) -> Self {
        self.aliases = aliases;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builtin(CombinationPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_is_nbcc() {
        let config = Config::default();
        assert_eq!(config.combinations.name(), "NBCC 2015");
        assert_eq!(config.occupancies.len(), 6);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_load_without_sources_matches_builtin() {
        let loaded = Config::load(CombinationPreset::Nbcc2015, ConfigSources::default()).unwrap();
        assert_eq!(loaded, Config::builtin(CombinationPreset::Nbcc2015));
    }

    #[test]
    fn test_load_overrides_combinations() {
        let path = std::env::temp_dir().join(format!("envelope_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"1.0D": [1, 0, 0, 0, 0]}"#).unwrap();

        let sources = ConfigSources {
            combinations: Some(&path),
            ..Default::default()
        };
        let config = Config::load(CombinationPreset::Nbcc2015, sources).unwrap();
        assert_eq!(config.combinations.names(), vec!["1.0D"]);
        // Occupancies still come from the built-ins
        assert_eq!(config.occupancies.len(), 6);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let sources = ConfigSources {
            occupancies: Some(Path::new("/nonexistent/occupancies.json")),
            ..Default::default()
        };
        let err = Config::load(CombinationPreset::Nbcc2015, sources).unwrap_err();
        assert!(err.is_external_source());
    }
}
