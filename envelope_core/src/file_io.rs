//! # File I/O Module
//!
//! Reads the external JSON resources the engine consumes and writes
//! calculation reports:
//!
//! - **Combination tables**: `{ "<name>": [D, L, S, W, E], ... }`
//! - **Occupancy presets**: `[{ "name": ..., "unit_loads": {...} }, ...]`
//! - **Alias lookups**: `{ "<alias>": "<category code>", ... }`
//! - **Scenarios**: an [`OverhangBeamInput`] document
//! - **Reports**: atomic save (write `.tmp`, fsync, rename)
//!
//! Every function honours the path it is given. Failures are reported as
//! `FileError` (could not read/write) or `SerializationError` (malformed
//! content), both of which answer `true` to
//! [`CalcError::is_external_source`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use envelope_core::file_io::load_combination_table;
//! use std::path::Path;
//!
//! let table = load_combination_table(Path::new("NBCC_vec_full.json"))?;
//! println!("{} combinations", table.len());
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::calculations::overhang_beam::OverhangBeamInput;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{AliasLookup, CombinationTable, OccupancyTable};

/// Read a whole file into a string
fn read_text(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    Ok(contents)
}

/// Read and parse a JSON file
fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_text(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Table name derived from the file stem (`NBCC_vec_full.json` -> `NBCC_vec_full`)
fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a combination table from `path`.
///
/// The table is named after the file stem so that error messages identify
/// which table was empty or malformed.
pub fn load_combination_table(path: &Path) -> CalcResult<CombinationTable> {
    let table: CombinationTable = read_json(path)?;
    let table = table.named(stem_of(path));
    debug!(path = %path.display(), combinations = table.len(), "loaded combination table");
    Ok(table)
}

/// Load occupancy presets from `path`
pub fn load_occupancy_table(path: &Path) -> CalcResult<OccupancyTable> {
    let contents = read_text(path)?;
    // Duplicate names are a defect of the file, not of the calculation
    let table = OccupancyTable::from_json_str(&contents).map_err(|e| {
        let reason = match e {
            CalcError::SerializationError { reason } => reason,
            other => other.to_string(),
        };
        CalcError::SerializationError {
            reason: format!("Invalid occupancy table in {}: {}", path.display(), reason),
        }
    })?;
    debug!(path = %path.display(), occupancies = table.len(), "loaded occupancy table");
    Ok(table)
}

/// Load an alias lookup from `path`
pub fn load_alias_lookup(path: &Path) -> CalcResult<AliasLookup> {
    let lookup: AliasLookup = read_json(path)?;
    debug!(path = %path.display(), aliases = lookup.len(), "loaded alias lookup");
    Ok(lookup)
}

/// Load a beam scenario from `path`
pub fn load_scenario(path: &Path) -> CalcResult<OverhangBeamInput> {
    read_json(path)
}

/// Save any serializable report with atomic write semantics.
///
/// 1. Serialize to pretty JSON
/// 2. Write to `<path>.tmp` and fsync
/// 3. Rename over `path`
pub fn save_report<T: Serialize>(report: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(report)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved report");
    Ok(())
}
