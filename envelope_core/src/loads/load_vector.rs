//! Load vectors
//!
//! A [`LoadVector`] holds one value per load category (D, L, S, W, E). The
//! value type is generic over [`Component`]:
//!
//! - `f64` for scalar loads and responses (a reaction, a unit load)
//! - [`Series`] for responses sampled along a member (moment, shear)
//!
//! Both share the factoring logic in [`super::factoring`].
//!
//! # Example
//! ```
//! use envelope_core::loads::{LoadVector, LoadCategory, Series};
//!
//! // Unit loads (kPa) scaled by a 3 m tributary width
//! let unit = LoadVector { d: 1.2, l: 2.4, ..Default::default() };
//! let line = unit * 3.0;
//! assert!((line.d - 3.6).abs() < 1e-12);
//! assert_eq!(*line.get(LoadCategory::Snow), 0.0);
//!
//! // Sampled responses; omitted categories broadcast as zero
//! let moment = LoadVector::<Series> {
//!     d: Series::from(vec![1.0, 2.0, 3.0]),
//!     l: Series::from(vec![0.0, 1.0, 2.0]),
//!     ..Default::default()
//! };
//! assert_eq!(moment.positions().unwrap(), Some(3));
//! ```

use std::fmt;
use std::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};

use super::load_types::LoadCategory;
use crate::errors::{CalcError, CalcResult};

/// A numeric value that can sit in one slot of a [`LoadVector`].
///
/// Implemented for `f64` (a single value that broadcasts to every position)
/// and [`Series`] (one value per sampled position).
pub trait Component: Clone + Default + fmt::Debug + PartialEq {
    /// Number of sampled positions, or `None` for a value that broadcasts.
    fn positions(&self) -> Option<usize>;

    /// Value at a sampled position.
    fn value_at(&self, index: usize) -> f64;

    /// Multiply every value by `factor`.
    fn scaled(&self, factor: f64) -> Self;

    /// Element-wise sum; sequences of different lengths are a shape error.
    fn try_add(&self, other: &Self) -> CalcResult<Self>;

    /// Build a value from one entry per position.
    fn from_values(values: Vec<f64>) -> Self;
}

impl Component for f64 {
    fn positions(&self) -> Option<usize> {
        None
    }

    fn value_at(&self, _index: usize) -> f64 {
        *self
    }

    fn scaled(&self, factor: f64) -> Self {
        self * factor
    }

    fn try_add(&self, other: &Self) -> CalcResult<Self> {
        Ok(self + other)
    }

    fn from_values(values: Vec<f64>) -> Self {
        values.first().copied().unwrap_or(0.0)
    }
}

/// Values sampled at positions along a member.
///
/// An empty series stands for an omitted category and broadcasts as zero
/// against series of any length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(pub Vec<f64>);

impl Series {
    /// A series of `n` zeros
    pub fn zeros(n: usize) -> Self {
        Series(vec![0.0; n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Largest value, or `None` for an empty series
    pub fn max_value(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::max)
    }

    /// Smallest value, or `None` for an empty series
    pub fn min_value(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::min)
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series(values)
    }
}

impl Component for Series {
    fn positions(&self) -> Option<usize> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.len())
        }
    }

    fn value_at(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    fn scaled(&self, factor: f64) -> Self {
        Series(self.0.iter().map(|v| v * factor).collect())
    }

    fn try_add(&self, other: &Self) -> CalcResult<Self> {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => Ok(other.clone()),
            (_, true) => Ok(self.clone()),
            _ if self.len() != other.len() => {
                Err(CalcError::shape_mismatch("series addition", self.len(), other.len()))
            }
            _ => Ok(Series(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())),
        }
    }

    fn from_values(values: Vec<f64>) -> Self {
        Series(values)
    }
}

impl Mul<f64> for Series {
    type Output = Series;

    fn mul(self, rhs: f64) -> Series {
        self.scaled(rhs)
    }
}

impl Neg for Series {
    type Output = Series;

    fn neg(self) -> Series {
        self.scaled(-1.0)
    }
}

/// One value per load category, in the fixed order D, L, S, W, E.
///
/// Omitted categories default to zero. Serialized with the category codes
/// as keys:
///
/// ```json
/// { "D": 1.2, "L": 2.4, "S": 0.0, "W": 0.0, "E": 0.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct LoadVector<T = f64> {
    /// Dead
    #[serde(rename = "D")]
    pub d: T,
    /// Live
    #[serde(rename = "L")]
    pub l: T,
    /// Snow
    #[serde(rename = "S")]
    pub s: T,
    /// Wind
    #[serde(rename = "W")]
    pub w: T,
    /// Earthquake
    #[serde(rename = "E")]
    pub e: T,
}

impl<T> LoadVector<T> {
    pub fn new(d: T, l: T, s: T, w: T, e: T) -> Self {
        LoadVector { d, l, s, w, e }
    }

    /// Build a vector by evaluating `f` for each category in order
    pub fn from_fn(mut f: impl FnMut(LoadCategory) -> T) -> Self {
        LoadVector {
            d: f(LoadCategory::Dead),
            l: f(LoadCategory::Live),
            s: f(LoadCategory::Snow),
            w: f(LoadCategory::Wind),
            e: f(LoadCategory::Earthquake),
        }
    }

    /// Value for one category
    pub fn get(&self, category: LoadCategory) -> &T {
        match category {
            LoadCategory::Dead => &self.d,
            LoadCategory::Live => &self.l,
            LoadCategory::Snow => &self.s,
            LoadCategory::Wind => &self.w,
            LoadCategory::Earthquake => &self.e,
        }
    }

    /// Copy of this vector with one category replaced
    pub fn with(mut self, category: LoadCategory, value: T) -> Self {
        match category {
            LoadCategory::Dead => self.d = value,
            LoadCategory::Live => self.l = value,
            LoadCategory::Snow => self.s = value,
            LoadCategory::Wind => self.w = value,
            LoadCategory::Earthquake => self.e = value,
        }
        self
    }

    /// Components in the fixed order D, L, S, W, E
    pub fn components(&self) -> [&T; 5] {
        [&self.d, &self.l, &self.s, &self.w, &self.e]
    }

    /// `(category, value)` pairs in the fixed order
    pub fn iter(&self) -> impl Iterator<Item = (LoadCategory, &T)> {
        LoadCategory::ALL.into_iter().zip(self.components())
    }

    /// Component-wise conversion into a new vector
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> LoadVector<U> {
        LoadVector {
            d: f(&self.d),
            l: f(&self.l),
            s: f(&self.s),
            w: f(&self.w),
            e: f(&self.e),
        }
    }
}

impl<T: Component> LoadVector<T> {
    /// Common number of sampled positions across all components.
    ///
    /// Returns `Ok(None)` when every component broadcasts (scalars or empty
    /// series) and `ShapeMismatch` when two sequence components disagree.
    pub fn positions(&self) -> CalcResult<Option<usize>> {
        let mut found: Option<(LoadCategory, usize)> = None;
        for (category, value) in self.iter() {
            let Some(n) = value.positions() else { continue };
            match found {
                None => found = Some((category, n)),
                Some((first, expected)) if expected != n => {
                    return Err(CalcError::shape_mismatch(
                        format!("load vector component {} (vs {})", category, first),
                        expected,
                        n,
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(found.map(|(_, n)| n))
    }

    /// The five category values at one position
    pub fn column(&self, index: usize) -> [f64; 5] {
        self.components().map(|c| c.value_at(index))
    }

    /// Multiply every component by `factor` (e.g. a tributary width)
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|c| c.scaled(factor))
    }

    /// Component-wise sum of two vectors
    pub fn try_add(&self, other: &Self) -> CalcResult<Self> {
        Ok(LoadVector {
            d: self.d.try_add(&other.d)?,
            l: self.l.try_add(&other.l)?,
            s: self.s.try_add(&other.s)?,
            w: self.w.try_add(&other.w)?,
            e: self.e.try_add(&other.e)?,
        })
    }
}

impl<T: Component> Mul<f64> for LoadVector<T> {
    type Output = LoadVector<T>;

    fn mul(self, rhs: f64) -> LoadVector<T> {
        self.scaled(rhs)
    }
}

impl<T: Component> Neg for LoadVector<T> {
    type Output = LoadVector<T>;

    fn neg(self) -> LoadVector<T> {
        self.scaled(-1.0)
    }
}

impl Add for LoadVector<f64> {
    type Output = LoadVector<f64>;

    fn add(self, rhs: LoadVector<f64>) -> LoadVector<f64> {
        LoadVector {
            d: self.d + rhs.d,
            l: self.l + rhs.l,
            s: self.s + rhs.s,
            w: self.w + rhs.w,
            e: self.e + rhs.e,
        }
    }
}

impl From<[f64; 5]> for LoadVector<f64> {
    fn from(values: [f64; 5]) -> Self {
        let [d, l, s, w, e] = values;
        LoadVector { d, l, s, w, e }
    }
}

impl fmt::Display for LoadVector<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(category, value)| format!("{}={}", category, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
