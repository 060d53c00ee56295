//! # Bauxite - R-Tree Spatial Index
//!
//! This crate provides an in-memory R-tree over axis-aligned rectangles in
//! arbitrary fixed dimension, built for workloads that care about how many
//! nodes a query touches.
//!
//! ## Features
//!
//! - **Guttman R-Tree**: least-enlargement insertion, quadratic splits,
//!   condensation with reinsertion on deletion
//! - **Arbitrary Dimension**: the first record fixes the dimension; 2D
//!   maps and 48-bin color histograms index the same way
//! - **Arbitrary Items**: any `Clone + Eq + Hash` value, mapped to compact
//!   synthetic ids internally
//! - **Window Queries**: intersection and containment searches, the latter
//!   reporting a simulated disk-access count
//! - **Nearest Neighbor**: branch-and-bound nearest and k-nearest search
//!   with distance ties kept
//! - **Bulk Loading**: bottom-up packed construction from a point set
//!
//! ## Quick Start
//!
//! ```rust
//! use bauxite::{Point, Rectangle, RTree, SpatialIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = RTree::new(8, 4)?;
//!
//! // Index some records
//! tree.insert(&Rectangle::from_min_max(vec![0.0, 0.0], vec![2.0, 2.0]), "a")?;
//! tree.insert(&Rectangle::from_min_max(vec![5.0, 5.0], vec![6.0, 8.0]), "b")?;
//!
//! // Window query
//! let hits = tree.intersecting(&Rectangle::from_min_max(vec![1.0, 1.0], vec![5.5, 5.5]))?;
//! assert_eq!(hits.len(), 2);
//!
//! // Nearest neighbor
//! let nearest = tree.nearest(&Point::new(vec![0.5, 0.5]), f64::INFINITY)?;
//! assert_eq!(nearest, vec!["a"]);
//! # Ok(())
//! # }
//! ```

// Core geometry modules
pub mod point;
pub mod rectangle;

// R-Tree modules
pub mod errors;
pub mod rtree;
pub mod spatial_index;

// Re-export geometry types
pub use point::Point;
pub use rectangle::Rectangle;

// Re-export R-Tree types
pub use errors::{SpatialError, SpatialResult};
pub use rtree::{IndexStats, RTree, DEFAULT_MAX_ENTRIES, DEFAULT_MIN_ENTRIES};
pub use spatial_index::SpatialIndex;
