//! SpatialIndex trait definition.

use crate::errors::SpatialResult;
use crate::point::Point;
use crate::rectangle::Rectangle;

/// A dynamic spatial index over axis-aligned rectangles.
///
/// This trait captures the operation set an experiment harness drives the
/// index with; `RTree` is the provided implementation. Items are arbitrary
/// equatable/hashable values owned by the index.
pub trait SpatialIndex<T> {
    /// Adds a record to the index.
    fn insert(&mut self, rectangle: &Rectangle, item: T) -> SpatialResult<()>;

    /// Removes a record from the index. Returns `Ok(false)` when no matching
    /// record exists (absence is not an error).
    fn remove(&mut self, rectangle: &Rectangle, item: &T) -> SpatialResult<bool>;

    /// Finds the items whose rectangles intersect the query rectangle.
    fn intersecting(&self, query: &Rectangle) -> SpatialResult<Vec<T>>;

    /// Finds the items whose rectangles are contained in the query
    /// rectangle, along with the number of nodes visited (the simulated
    /// disk-access count for the query).
    fn contained(&self, query: &Rectangle) -> SpatialResult<(Vec<T>, u64)>;

    /// Finds the items nearest to a point using branch-and-bound search,
    /// starting from `distance_limit` as the initial bound. All items tied
    /// at the best distance are returned.
    fn nearest(&self, point: &Point, distance_limit: f64) -> SpatialResult<Vec<T>>;

    /// Finds `k` items near a point by collecting tied-distance classes
    /// outward. When a class straddles the cutoff, the first entries in
    /// traversal order are kept, so the result is not guaranteed to be the
    /// exact global k nearest under boundary ties.
    fn k_nearest(&self, point: &Point, k: usize) -> SpatialResult<Vec<T>>;

    /// Number of records currently in the index.
    fn size(&self) -> usize;
}
