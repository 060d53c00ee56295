//! N-dimensional point type used for keys and nearest-neighbor queries.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in n-dimensional space.
///
/// Points carry their own dimension; a tree fixes its dimension from the
/// first key it sees and rejects geometry of any other dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    coordinate: Vec<f64>,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(coordinate: Vec<f64>) -> Self {
        Point { coordinate }
    }

    /// Number of dimensions of this point.
    pub fn dimension(&self) -> usize {
        self.coordinate.len()
    }

    /// The raw coordinate slice.
    pub fn coordinate(&self) -> &[f64] {
        &self.coordinate
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.coordinate[axis]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coordinate.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
