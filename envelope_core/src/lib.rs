//! # envelope_core - Factored Beam Envelope Engine
//!
//! `envelope_core` turns service loads on a backspan + cantilever beam into
//! factored design envelopes. Loads are carried as five-category vectors
//! (dead, live, snow, wind, earthquake), the beam is solved once per
//! category, and every response is factored through a load-combination
//! table to find the governing maximum and minimum at each position.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an explicit [`Config`]
//! - **JSON-First**: Inputs, tables and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use envelope_core::loads::{envelope, CombinationPreset, LoadVector};
//!
//! let table = CombinationPreset::Nbcc2015.combinations();
//! let load = LoadVector { d: 10.0, l: 5.0, ..Default::default() };
//!
//! let env = envelope(&load, &table)?;
//! assert_eq!(env.max_governing(&table), vec!["NBCC-2a"]);
//! # Ok::<(), envelope_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load vectors, combination tables and the factoring engine
//! - [`calculations`] - Overhang beam statics and design envelopes
//! - [`config`] - Combination table, occupancies and aliases for a session
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON resources and atomic report saves

pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod loads;

// Re-export commonly used types at crate root for convenience
pub use config::{Config, ConfigSources};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_scenario, save_report};
