//! Axis-aligned bounding rectangles in arbitrary dimension.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// An axis-aligned rectangle in n-dimensional space, stored as min/max
/// coordinate vectors.
///
/// Rectangles double as the cached minimum bounding rectangle of a tree
/// node, so they are mutable in place (`add_rectangle`, `add_point`,
/// `set`). Every binary operation requires equal dimension on both sides
/// and asserts it; the tree validates dimensions at its public boundary
/// before geometry ever reaches these methods.
///
/// # Examples
///
/// ```rust
/// use bauxite::{Point, Rectangle};
///
/// let a = Rectangle::new(&Point::new(vec![0.0, 0.0]), &Point::new(vec![4.0, 4.0]));
/// let b = Rectangle::from_min_max(vec![4.0, 4.0], vec![6.0, 6.0]);
///
/// assert!(a.intersects_with(&b)); // touching counts
/// assert_eq!(a.area(), 16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl Rectangle {
    /// Creates a rectangle spanning two corner points, normalizing the
    /// corners component-wise so `min[i] <= max[i]` always holds.
    pub fn new(a: &Point, b: &Point) -> Rectangle {
        assert_eq!(a.dimension(), b.dimension(), "corner dimensions differ");
        let mut min = Vec::with_capacity(a.dimension());
        let mut max = Vec::with_capacity(a.dimension());
        for i in 0..a.dimension() {
            min.push(a[i].min(b[i]));
            max.push(a[i].max(b[i]));
        }
        Rectangle { min, max }
    }

    /// Creates a rectangle directly from min/max vectors.
    pub fn from_min_max(min: Vec<f64>, max: Vec<f64>) -> Rectangle {
        debug_assert_eq!(min.len(), max.len(), "min/max dimensions differ");
        debug_assert!(
            min.iter().zip(&max).all(|(lo, hi)| lo <= hi),
            "min must not exceed max on any axis"
        );
        Rectangle { min, max }
    }

    /// Creates the degenerate (zero-extent) rectangle covering a single point.
    pub fn from_point(point: &Point) -> Rectangle {
        Rectangle {
            min: point.coordinate().to_vec(),
            max: point.coordinate().to_vec(),
        }
    }

    /// Number of dimensions of this rectangle.
    pub fn dimension(&self) -> usize {
        self.min.len()
    }

    /// The minimum corner coordinates.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// The maximum corner coordinates.
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// The side length along one axis.
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Product of the extents over all axes; zero for degenerate rectangles.
    pub fn area(&self) -> f64 {
        (0..self.dimension()).map(|i| self.extent(i)).product()
    }

    /// Overwrites this rectangle with another's coordinates, in place.
    pub fn set(&mut self, other: &Rectangle) {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        self.min.copy_from_slice(&other.min);
        self.max.copy_from_slice(&other.max);
    }

    /// Checks whether any axis has a coincident min or coincident max
    /// boundary with `other`.
    ///
    /// This is not a geometric overlap test. It answers "does `other` touch
    /// the boundary of `self`", which is how a node decides whether removing
    /// an entry can shrink its cached bounding rectangle.
    pub fn overlaps_with(&self, other: &Rectangle) -> bool {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        for i in 0..self.dimension() {
            if self.min[i] == other.min[i] || self.max[i] == other.max[i] {
                return true;
            }
        }
        false
    }

    /// Standard AABB intersection test; touching counts as intersecting.
    pub fn intersects_with(&self, other: &Rectangle) -> bool {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        for i in 0..self.dimension() {
            if self.min[i] > other.max[i] || self.max[i] < other.min[i] {
                return false;
            }
        }
        true
    }

    /// Checks whether `other` lies fully inside or on the boundary of `self`.
    pub fn contains(&self, other: &Rectangle) -> bool {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        for i in 0..self.dimension() {
            if other.min[i] < self.min[i] || other.max[i] > self.max[i] {
                return false;
            }
        }
        true
    }

    /// Checks whether `self` lies fully inside or on the boundary of `other`.
    pub fn is_contained_by(&self, other: &Rectangle) -> bool {
        other.contains(self)
    }

    /// Returns a new rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        let mut min = Vec::with_capacity(self.dimension());
        let mut max = Vec::with_capacity(self.dimension());
        for i in 0..self.dimension() {
            min.push(self.min[i].min(other.min[i]));
            max.push(self.max[i].max(other.max[i]));
        }
        Rectangle { min, max }
    }

    /// Grows this rectangle in place to cover `other`.
    pub fn add_rectangle(&mut self, other: &Rectangle) {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        for i in 0..self.dimension() {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    /// Grows this rectangle in place to cover a point.
    pub fn add_point(&mut self, point: &Point) {
        assert_eq!(self.dimension(), point.dimension(), "dimensions differ");
        for i in 0..self.dimension() {
            self.min[i] = self.min[i].min(point[i]);
            self.max[i] = self.max[i].max(point[i]);
        }
    }

    /// Area growth needed to cover `other`: `union(self, other).area() - self.area()`.
    pub fn enlargement(&self, other: &Rectangle) -> f64 {
        self.union(other).area() - self.area()
    }

    /// Euclidean distance from the nearest point of `self` to `point`;
    /// zero when the point lies inside.
    pub fn minimal_distance_to(&self, point: &Point) -> f64 {
        assert_eq!(self.dimension(), point.dimension(), "dimensions differ");
        let mut sum = 0.0;
        for i in 0..self.dimension() {
            let d = point[i] - point[i].clamp(self.min[i], self.max[i]);
            sum += d * d;
        }
        sum.sqrt()
    }

    /// Euclidean distance between the nearest pair of points of `self` and
    /// `other`; zero when they intersect.
    pub fn minimal_distance_to_rect(&self, other: &Rectangle) -> f64 {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        let mut sum = 0.0;
        for i in 0..self.dimension() {
            let gap = (other.min[i] - self.max[i])
                .max(self.min[i] - other.max[i])
                .max(0.0);
            sum += gap * gap;
        }
        sum.sqrt()
    }

    /// Euclidean distance from the farthest point of `self` to `point`.
    pub fn maximal_distance_to(&self, point: &Point) -> f64 {
        assert_eq!(self.dimension(), point.dimension(), "dimensions differ");
        let mut sum = 0.0;
        for i in 0..self.dimension() {
            let d = (point[i] - self.min[i]).abs().max((point[i] - self.max[i]).abs());
            sum += d * d;
        }
        sum.sqrt()
    }

    /// Euclidean distance between the farthest pair of points of `self` and
    /// `other`.
    pub fn maximal_distance_to_rect(&self, other: &Rectangle) -> f64 {
        assert_eq!(self.dimension(), other.dimension(), "rectangle dimensions differ");
        let mut sum = 0.0;
        for i in 0..self.dimension() {
            let d = (self.max[i] - other.min[i])
                .abs()
                .max((other.max[i] - self.min[i]).abs());
            sum += d * d;
        }
        sum.sqrt()
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner = |f: &mut fmt::Formatter<'_>, c: &[f64]| -> fmt::Result {
            write!(f, "(")?;
            for (i, v) in c.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, ")")
        };
        write!(f, "Rectangle(")?;
        corner(f, &self.min)?;
        write!(f, ", ")?;
        corner(f, &self.max)?;
        write!(f, ")")
    }
}
