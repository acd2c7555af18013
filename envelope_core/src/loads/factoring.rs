//! Load factoring engine
//!
//! Applies every combination in a [`CombinationTable`] to a [`LoadVector`]
//! and reduces the results to envelopes:
//!
//! - [`factored_max`] / [`factored_min`] - element-wise extreme over all
//!   combinations
//! - [`factored_max_trace`] / [`factored_min_trace`] - row index of the
//!   governing combination at each position
//! - [`envelope`] - all four at once, from a single [`FactoredMatrix`]
//!
//! Scalar loads (`LoadVector<f64>`) give scalar envelopes; sampled loads
//! (`LoadVector<Series>`) give one value per position.
//!
//! # Example
//! ```
//! use envelope_core::loads::{CombinationTable, LoadVector, factored_max, factored_min, factored_max_trace};
//!
//! let table = CombinationTable::new("demo")
//!     .with_combination("1.25D+1.5L", [1.25, 1.5, 0.0, 0.0, 0.0])?
//!     .with_combination("1.0D", [1.0, 0.0, 0.0, 0.0, 0.0])?;
//! let load = LoadVector { d: 10.0, l: 5.0, ..Default::default() };
//!
//! assert_eq!(factored_max(&load, &table)?, 20.0);
//! assert_eq!(factored_min(&load, &table)?, 10.0);
//! assert_eq!(factored_max_trace(&load, &table)?, vec![0]);
//! # Ok::<(), envelope_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::combinations::{CombinationTable, FactorVector};
use super::load_vector::{Component, LoadVector};
use crate::errors::{CalcError, CalcResult};

/// Linear combination of one column of category values with one factor
/// vector. Both slices must hold exactly five entries in (D, L, S, W, E)
/// order.
pub fn factor_column(column: &[f64], factors: &[f64]) -> CalcResult<f64> {
    if column.len() != 5 {
        return Err(CalcError::shape_mismatch("load column", 5, column.len()));
    }
    if factors.len() != 5 {
        return Err(CalcError::shape_mismatch("factor vector", 5, factors.len()));
    }
    Ok(column.iter().zip(factors).map(|(v, f)| v * f).sum())
}

impl<T: Component> LoadVector<T> {
    /// Factored value of this load under one combination, at every position
    pub fn factor(&self, factors: &FactorVector) -> CalcResult<T> {
        let width = self.positions()?.unwrap_or(1);
        let values = (0..width).map(|i| factors.dot(&self.column(i))).collect();
        Ok(T::from_values(values))
    }
}

fn check_table(table: &CombinationTable) -> CalcResult<()> {
    if table.is_empty() {
        return Err(CalcError::empty_table(table.name()));
    }
    Ok(())
}

/// `candidate` replaces `best` in a max search. NaN wins over any number
/// and the earlier row wins ties.
fn above(candidate: f64, best: f64) -> bool {
    (candidate.is_nan() && !best.is_nan()) || candidate > best
}

/// `candidate` replaces `best` in a min search, with the same NaN and tie rules
fn below(candidate: f64, best: f64) -> bool {
    (candidate.is_nan() && !best.is_nan()) || candidate < best
}

fn reduce<T: Component>(
    load: &LoadVector<T>,
    table: &CombinationTable,
    better: fn(f64, f64) -> bool,
) -> CalcResult<T> {
    check_table(table)?;
    let width = load.positions()?.unwrap_or(1);
    let columns: Vec<[f64; 5]> = (0..width).map(|i| load.column(i)).collect();

    let mut rows = table
        .iter()
        .map(|combo| columns.iter().map(|column| combo.factors.dot(column)).collect::<Vec<f64>>());
    let mut acc = rows.next().unwrap_or_default();
    for row in rows {
        for (slot, value) in acc.iter_mut().zip(row) {
            if better(value, *slot) {
                *slot = value;
            }
        }
    }
    Ok(T::from_values(acc))
}

/// Maximum factored value over every combination in `table`.
///
/// A NaN factored value propagates into the result, matching the row
/// reported by [`factored_max_trace`]. Fails with `EmptyCombinationTable` when the table has no rows and with
/// `ShapeMismatch` when the load's sequence components disagree in length.
pub fn factored_max<T: Component>(load: &LoadVector<T>, table: &CombinationTable) -> CalcResult<T> {
    reduce(load, table, above)
}

/// Minimum factored value over every combination in `table`.
pub fn factored_min<T: Component>(load: &LoadVector<T>, table: &CombinationTable) -> CalcResult<T> {
    reduce(load, table, below)
}

/// Factored results for every combination: one row per combination (table
/// order), one column per position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoredMatrix {
    rows: Vec<Vec<f64>>,
    width: usize,
}

impl FactoredMatrix {
    /// Number of combinations
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of positions (1 for scalar loads)
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Factored values of one combination
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Factored values of every combination at one position
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.width {
            return None;
        }
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Column-wise maximum, read from the rows picked by [`argmax`](Self::argmax)
    pub fn max_envelope(&self) -> Vec<f64> {
        self.pick(&self.argmax())
    }

    /// Column-wise minimum, read from the rows picked by [`argmin`](Self::argmin)
    pub fn min_envelope(&self) -> Vec<f64> {
        self.pick(&self.argmin())
    }

    /// Row index of the column-wise maximum; NaN rows win, ties go to the earlier row
    pub fn argmax(&self) -> Vec<usize> {
        self.arg_by(above)
    }

    /// Row index of the column-wise minimum; NaN rows win, ties go to the earlier row
    pub fn argmin(&self) -> Vec<usize> {
        self.arg_by(below)
    }

    fn pick(&self, trace: &[usize]) -> Vec<f64> {
        trace.iter().enumerate().map(|(col, row)| self.rows[*row][col]).collect()
    }

    fn arg_by(&self, better: fn(f64, f64) -> bool) -> Vec<usize> {
        (0..self.width)
            .map(|col| {
                let mut best = 0;
                for (index, row) in self.rows.iter().enumerate().skip(1) {
                    if better(row[col], self.rows[best][col]) {
                        best = index;
                    }
                }
                best
            })
            .collect()
    }
}

/// Evaluate every combination against `load`.
pub fn factored_matrix<T: Component>(load: &LoadVector<T>, table: &CombinationTable) -> CalcResult<FactoredMatrix> {
    check_table(table)?;
    let width = load.positions()?.unwrap_or(1);
    let columns: Vec<[f64; 5]> = (0..width).map(|i| load.column(i)).collect();

    let rows = table
        .iter()
        .map(|combo| {
            if combo.factors.is_zero() {
                warn!(table = table.name(), combination = %combo.name, "combination has all-zero factors");
            }
            columns.iter().map(|column| combo.factors.dot(column)).collect()
        })
        .collect();

    debug!(table = table.name(), rows = table.len(), width, "built factored matrix");
    Ok(FactoredMatrix { rows, width })
}

/// Row index of the combination producing the maximum at each position
pub fn factored_max_trace<T: Component>(load: &LoadVector<T>, table: &CombinationTable) -> CalcResult<Vec<usize>> {
    Ok(factored_matrix(load, table)?.argmax())
}

/// Row index of the combination producing the minimum at each position
pub fn factored_min_trace<T: Component>(load: &LoadVector<T>, table: &CombinationTable) -> CalcResult<Vec<usize>> {
    Ok(factored_matrix(load, table)?.argmin())
}

/// Max/min envelopes of one response together with their governing traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub max: T,
    pub min: T,
    /// Row index of the governing combination for `max`, per position
    pub max_trace: Vec<usize>,
    /// Row index of the governing combination for `min`, per position
    pub min_trace: Vec<usize>,
}

impl<T> Envelope<T> {
    /// Governing combination names for `max`, per position
    pub fn max_governing<'a>(&self, table: &'a CombinationTable) -> Vec<&'a str> {
        self.max_trace.iter().filter_map(|i| table.name_at(*i)).collect()
    }

    /// Governing combination names for `min`, per position
    pub fn min_governing<'a>(&self, table: &'a CombinationTable) -> Vec<&'a str> {
        self.min_trace.iter().filter_map(|i| table.name_at(*i)).collect()
    }
}

/// Compute both envelopes and both traces from one factored matrix
pub fn envelope<T: Component>(load: &LoadVector<T>, table: &CombinationTable) -> CalcResult<Envelope<T>> {
    let matrix = factored_matrix(load, table)?;
    let max_trace = matrix.argmax();
    let min_trace = matrix.argmin();
    Ok(Envelope {
        max: T::from_values(matrix.pick(&max_trace)),
        min: T::from_values(matrix.pick(&min_trace)),
        max_trace,
        min_trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{nbcc_2015_combinations, Series};
    use proptest::prelude::*;

    fn demo_table() -> CombinationTable {
        CombinationTable::new("demo")
            .with_combination("1.25D+1.5L", [1.25, 1.5, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("1.0D", [1.0, 0.0, 0.0, 0.0, 0.0]))
            .unwrap()
    }

    fn series(values: &[f64]) -> Series {
        Series(values.to_vec())
    }

    #[test]
    fn test_factor_column() {
        let value = factor_column(&[10.0, 5.0, 0.0, 0.0, 0.0], &[1.25, 1.5, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(value, 20.0);
    }

    #[test]
    fn test_factor_column_rejects_bad_lengths() {
        let err = factor_column(&[1.0, 2.0, 3.0, 4.0], &[1.0; 5]).unwrap_err();
        assert_eq!(err, CalcError::shape_mismatch("load column", 5, 4));
        let err = factor_column(&[1.0; 5], &[1.0; 6]).unwrap_err();
        assert_eq!(err, CalcError::shape_mismatch("factor vector", 5, 6));
    }

    #[test]
    fn test_zero_factors_give_zero() {
        let zero = FactorVector::default();
        let scalar = LoadVector::new(3.0, -2.0, 1.0, 7.0, 4.0);
        assert_eq!(scalar.factor(&zero).unwrap(), 0.0);

        let sampled = LoadVector::<Series> {
            d: series(&[1.0, 2.0, 3.0]),
            w: series(&[-4.0, 0.5, 9.0]),
            ..Default::default()
        };
        assert_eq!(sampled.factor(&zero).unwrap(), Series::zeros(3));
    }

    #[test]
    fn test_scalar_end_to_end() {
        let load = LoadVector { d: 10.0, l: 5.0, ..Default::default() };
        let table = demo_table();

        assert_eq!(factored_max(&load, &table).unwrap(), 20.0);
        assert_eq!(factored_min(&load, &table).unwrap(), 10.0);
        assert_eq!(factored_max_trace(&load, &table).unwrap(), vec![0]);
        assert_eq!(factored_min_trace(&load, &table).unwrap(), vec![1]);
    }

    #[test]
    fn test_array_envelope() {
        let load = LoadVector::<Series> {
            d: series(&[1.0, 2.0, 3.0]),
            l: series(&[0.0, 1.0, 2.0]),
            ..Default::default()
        };
        let table = CombinationTable::new("single")
            .with_combination("D+L", [1.0, 1.0, 0.0, 0.0, 0.0])
            .unwrap();

        assert_eq!(factored_max(&load, &table).unwrap(), series(&[1.0, 3.0, 5.0]));
        assert_eq!(factored_min(&load, &table).unwrap(), series(&[1.0, 3.0, 5.0]));
    }

    #[test]
    fn test_array_trace_varies_by_position() {
        // Wind reverses sign along the member, so the governing combination changes
        let load = LoadVector::<Series> {
            d: series(&[1.0, 1.0, 1.0]),
            w: series(&[-2.0, 0.0, 2.0]),
            ..Default::default()
        };
        let table = CombinationTable::new("wind")
            .with_combination("D", [1.0, 0.0, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("D+W", [1.0, 0.0, 0.0, 1.0, 0.0]))
            .unwrap();

        assert_eq!(factored_max_trace(&load, &table).unwrap(), vec![0, 0, 1]);
        assert_eq!(factored_min_trace(&load, &table).unwrap(), vec![1, 0, 0]);
        assert_eq!(factored_max(&load, &table).unwrap(), series(&[1.0, 1.0, 3.0]));
    }

    #[test]
    fn test_ties_go_to_first_combination() {
        let load = LoadVector { d: 4.0, ..Default::default() };
        let table = CombinationTable::new("ties")
            .with_combination("first", [1.0, 0.0, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("second", [1.0, 9.0, 0.0, 0.0, 0.0]))
            .unwrap();
        assert_eq!(factored_max_trace(&load, &table).unwrap(), vec![0]);
        assert_eq!(factored_min_trace(&load, &table).unwrap(), vec![0]);
    }

    #[test]
    fn test_all_zero_combination_participates() {
        let load = LoadVector { d: -5.0, ..Default::default() };
        let table = CombinationTable::new("zero")
            .with_combination("1.0D", [1.0, 0.0, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("none", [0.0; 5]))
            .unwrap();
        assert_eq!(factored_max(&load, &table).unwrap(), 0.0);
        assert_eq!(factored_max_trace(&load, &table).unwrap(), vec![1]);
    }

    #[test]
    fn test_nan_rows_propagate_into_envelope_and_trace() {
        // inf x 0 is NaN in every row
        let load = LoadVector { d: f64::INFINITY, l: 1.0, ..Default::default() };
        let table = CombinationTable::new("nan")
            .with_combination("L only", [0.0, 1.0, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("1.5L", [0.0, 1.5, 0.0, 0.0, 0.0]))
            .unwrap();

        let max = factored_max(&load, &table).unwrap();
        let min = factored_min(&load, &table).unwrap();
        assert!(max.is_nan() && min.is_nan());

        let matrix = factored_matrix(&load, &table).unwrap();
        let trace = factored_max_trace(&load, &table).unwrap();
        assert_eq!(trace, vec![0]);
        assert!(matrix.rows()[trace[0]][0].is_nan());

        let env = envelope(&load, &table).unwrap();
        assert!(env.max.is_nan() && env.min.is_nan());
    }

    #[test]
    fn test_single_nan_row_governs() {
        let load = LoadVector { d: f64::INFINITY, l: 2.0, ..Default::default() };
        let table = CombinationTable::new("mixed")
            .with_combination("L only", [0.0, 1.0, 0.0, 0.0, 0.0])
            .and_then(|t| t.with_combination("D", [1.0, 0.0, 0.0, 0.0, 0.0]))
            .and_then(|t| t.with_combination("-L", [0.0, -1.0, 0.0, 0.0, 0.0]))
            .unwrap();

        // Row 0 is NaN, row 1 is +inf, row 2 is NaN
        let max = factored_max(&load, &table).unwrap();
        assert!(max.is_nan());
        assert_eq!(factored_max_trace(&load, &table).unwrap(), vec![0]);
        assert!(factored_min(&load, &table).unwrap().is_nan());
        assert_eq!(factored_min_trace(&load, &table).unwrap(), vec![0]);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let load = LoadVector { d: 1.0, ..Default::default() };
        let empty = CombinationTable::new("nothing");
        let expected = CalcError::empty_table("nothing");
        assert_eq!(factored_max(&load, &empty).unwrap_err(), expected);
        assert_eq!(factored_min(&load, &empty).unwrap_err(), expected);
        assert_eq!(factored_max_trace(&load, &empty).unwrap_err(), expected);
        assert_eq!(envelope(&load, &empty).unwrap_err(), expected);
    }

    #[test]
    fn test_shape_mismatch_propagates() {
        let load = LoadVector::<Series> {
            d: series(&[1.0, 2.0]),
            l: series(&[1.0, 2.0, 3.0]),
            ..Default::default()
        };
        let err = factored_max(&load, &demo_table()).unwrap_err();
        assert_eq!(err.error_code(), "SHAPE_MISMATCH");
    }

    #[test]
    fn test_envelope_and_governing_names() {
        let load = LoadVector { d: 10.0, l: 5.0, ..Default::default() };
        let table = demo_table();
        let env = envelope(&load, &table).unwrap();
        assert_eq!(env.max, 20.0);
        assert_eq!(env.min, 10.0);
        assert_eq!(env.max_governing(&table), vec!["1.25D+1.5L"]);
        assert_eq!(env.min_governing(&table), vec!["1.0D"]);
    }

    #[test]
    fn test_matrix_layout() {
        let load = LoadVector::<Series> {
            d: series(&[1.0, 2.0]),
            l: series(&[2.0, 0.0]),
            ..Default::default()
        };
        let matrix = factored_matrix(&load, &demo_table()).unwrap();
        assert_eq!(matrix.num_rows(), 2);
        assert_eq!(matrix.width(), 2);
        assert_eq!(matrix.row(0).unwrap(), &[4.25, 2.5]);
        assert_eq!(matrix.row(1).unwrap(), &[1.0, 2.0]);
        assert_eq!(matrix.column(1), Some(vec![2.5, 2.0]));
        assert_eq!(matrix.column(2), None);
        assert_eq!(matrix.max_envelope(), vec![4.25, 2.5]);
        assert_eq!(matrix.min_envelope(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_nbcc_governing_for_floor_load() {
        let load = LoadVector { d: 3.6, l: 2.4, ..Default::default() };
        let table = nbcc_2015_combinations();
        let env = envelope(&load, &table).unwrap();
        // 1.25D + 1.5L = 4.5 + 3.6
        assert!((env.max - 8.1).abs() < 1e-9);
        assert_eq!(env.max_governing(&table), vec!["NBCC-2a"]);
        // 0.9D alone in the wind/earthquake cases with zero W and E
        assert!((env.min - 3.24).abs() < 1e-9);
    }

    fn sampled_load(width: usize) -> impl Strategy<Value = LoadVector<Series>> {
        prop::collection::vec(prop::array::uniform5(-100.0f64..100.0), width).prop_map(|columns| {
            LoadVector::from_fn(|category| {
                Series(columns.iter().map(|c| c[category.index()]).collect())
            })
        })
    }

    fn any_table() -> impl Strategy<Value = CombinationTable> {
        prop::collection::vec(prop::array::uniform5(-2.0f64..2.0), 1..8).prop_map(|rows| {
            let mut table = CombinationTable::new("generated");
            for (i, factors) in rows.into_iter().enumerate() {
                table
                    .push(crate::loads::LoadCombination {
                        name: format!("C{}", i),
                        factors: FactorVector(factors),
                    })
                    .unwrap();
            }
            table
        })
    }

    fn load_and_table() -> impl Strategy<Value = (LoadVector<Series>, CombinationTable)> {
        (1usize..12).prop_flat_map(|width| (sampled_load(width), any_table()))
    }

    proptest! {
        /// The max envelope bounds every combination and is attained by one of them.
        #[test]
        fn max_bounds_and_attains((load, table) in load_and_table()) {
            let max = factored_max(&load, &table).unwrap();
            let width = max.len();
            for pos in 0..width {
                let mut attained = false;
                for combo in &table {
                    let value = combo.factors.dot(&load.column(pos));
                    prop_assert!(max.value_at(pos) >= value);
                    attained |= max.value_at(pos) == value;
                }
                prop_assert!(attained);
            }
        }

        /// The min envelope never exceeds the max envelope.
        #[test]
        fn min_below_max((load, table) in load_and_table()) {
            let max = factored_max(&load, &table).unwrap();
            let min = factored_min(&load, &table).unwrap();
            for (lo, hi) in min.iter().zip(max.iter()) {
                prop_assert!(lo <= hi);
            }
        }

        /// Negating every factor swaps the envelopes.
        #[test]
        fn negation_symmetry((load, table) in load_and_table()) {
            let max_negated = factored_max(&load, &table.negated()).unwrap();
            let min = factored_min(&load, &table).unwrap();
            for (a, b) in max_negated.iter().zip(min.iter()) {
                prop_assert!((a + b).abs() < 1e-9);
            }
        }

        /// The trace points at a combination that produces the envelope value.
        #[test]
        fn trace_consistency((load, table) in load_and_table()) {
            let max = factored_max(&load, &table).unwrap();
            let trace = factored_max_trace(&load, &table).unwrap();
            let matrix = factored_matrix(&load, &table).unwrap();
            prop_assert_eq!(trace.len(), max.len());
            for (pos, row) in trace.iter().enumerate() {
                prop_assert_eq!(matrix.rows()[*row][pos], max.value_at(pos));
            }
            let min = factored_min(&load, &table).unwrap();
            let min_trace = factored_min_trace(&load, &table).unwrap();
            for (pos, row) in min_trace.iter().enumerate() {
                prop_assert_eq!(matrix.rows()[*row][pos], min.value_at(pos));
            }
        }
    }
}
