//! Arena-backed R-tree implementation.
//!
//! This module provides a dynamic R-tree built on Guttman's algorithms:
//! - Least-enlargement subtree choice with quadratic node splitting
//! - Upward MBR adjustment along an explicitly recorded insertion path
//! - Condensation with entry reinsertion after deletions
//! - Branch-and-bound nearest-neighbor search over tied-distance classes
//!
//! Nodes live in an id-indexed arena owned by the tree and reference each
//! other only by integer id, so the tree is an index graph rather than a
//! pointer graph. Every query exposes its work through plain return values;
//! the `contained` query additionally reports the number of nodes it
//! visited, the tree's proxy for disk accesses.

mod bulk_load;
mod node;
mod tree_impl;

pub use tree_impl::{IndexStats, RTree, DEFAULT_MAX_ENTRIES, DEFAULT_MIN_ENTRIES};
