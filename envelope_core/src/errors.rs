//! # Error Types
//!
//! Structured error types for envelope_core. Every failure carries enough
//! context (the offending vector, table or file) to diagnose it without a
//! debugger, and serializes cleanly so a front end can display it.
//!
//! Errors fall into two families:
//!
//! - **Computation errors**: shape mismatches, empty combination tables,
//!   unrecognized load categories, invalid inputs.
//! - **External-source errors**: a combination table, occupancy table or
//!   scenario file could not be read or parsed. See
//!   [`CalcError::is_external_source`].
//!
//! ## Example
//!
//! ```rust
//! use envelope_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span: f64) -> CalcResult<()> {
//!     if span <= 0.0 {
//!         return Err(CalcError::invalid_input("backspan", span.to_string(), "Span must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for envelope_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for factoring and analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, inconsistent, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A vector or sequence does not have the length the operation requires
    #[error("Shape mismatch in {context}: expected {expected} entries, found {found}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A max/min envelope was requested over a table with no combinations
    #[error("Combination table '{table}' is empty; envelope is undefined")]
    EmptyCombinationTable { table: String },

    /// A load name resolved to something outside D, L, S, W, E
    #[error("Load '{name}' resolves to unrecognized category '{category}'")]
    UnrecognizedCategory { name: String, category: String },

    /// Occupancy preset not found
    #[error("Occupancy not found: {occupancy}")]
    OccupancyNotFound { occupancy: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ShapeMismatch error
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        CalcError::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Create an EmptyCombinationTable error
    pub fn empty_table(table: impl Into<String>) -> Self {
        CalcError::EmptyCombinationTable { table: table.into() }
    }

    /// Create an UnrecognizedCategory error
    pub fn unrecognized_category(name: impl Into<String>, category: impl Into<String>) -> Self {
        CalcError::UnrecognizedCategory {
            name: name.into(),
            category: category.into(),
        }
    }

    /// Create an OccupancyNotFound error
    pub fn occupancy_not_found(occupancy: impl Into<String>) -> Self {
        CalcError::OccupancyNotFound {
            occupancy: occupancy.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from loading an external resource rather
    /// than from a computation
    pub fn is_external_source(&self) -> bool {
        matches!(self, CalcError::FileError { .. } | CalcError::SerializationError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            CalcError::EmptyCombinationTable { .. } => "EMPTY_COMBINATION_TABLE",
            CalcError::UnrecognizedCategory { .. } => "UNRECOGNIZED_CATEGORY",
            CalcError::OccupancyNotFound { .. } => "OCCUPANCY_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}
