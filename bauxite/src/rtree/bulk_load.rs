//! Bottom-up bulk construction from a complete point set.
//!
//! Algorithmically separate from incremental insertion: instead of
//! splitting nodes as they overflow, the record set is partitioned top-down
//! by sorting on cyclically chosen axes and cutting into near-equal groups,
//! then packed into nodes bottom-up. Branch depths may come out uneven;
//! the rest of the tree tolerates that by checking leaf-ness per node.

use std::cmp::Ordering;
use std::hash::Hash;

use log::debug;

use crate::errors::{SpatialError, SpatialResult};
use crate::point::Point;
use crate::rectangle::Rectangle;
use crate::spatial_index::SpatialIndex;

use super::node::Node;
use super::tree_impl::RTree;

impl<T: Clone + Eq + Hash> RTree<T> {
    /// Builds a tree from a complete list of (point, item) records.
    ///
    /// Configuration rules match [`RTree::new`]. All points must share one
    /// dimension. An empty list yields an empty tree.
    pub fn bulk_load(
        max_entries: usize,
        min_entries: usize,
        records: Vec<(Point, T)>,
    ) -> SpatialResult<RTree<T>> {
        let mut tree = RTree::new(max_entries, min_entries)?;
        if records.is_empty() {
            return Ok(tree);
        }

        let dimension = records[0].0.dimension();
        for (point, _) in &records {
            if point.dimension() != dimension {
                return Err(SpatialError::DimensionMismatch {
                    expected: dimension,
                    found: point.dimension(),
                });
            }
        }
        tree.dimension = Some(dimension);

        // Register the items and pair each with its degenerate rectangle.
        let mut entries: Vec<(Rectangle, u64)> = Vec::with_capacity(records.len());
        for (point, item) in records {
            let item_id = tree.allocate_item_id();
            tree.item_of_id.insert(item_id, item.clone());
            tree.id_of_item.insert(item, item_id);
            entries.push((Rectangle::from_point(&point), item_id));
        }

        // The placeholder root leaf is rebuilt by the packing pass.
        tree.free_node(tree.root_id);
        tree.root_id = tree.pack(&mut entries, 0);
        tree.height = tree.node(tree.root_id).level();

        debug!(
            "bulk loaded {} records into {} nodes at height {}",
            tree.size(),
            tree.stats().node_count,
            tree.height
        );
        Ok(tree)
    }

    /// Packs a run of records into a subtree and returns its root id. Runs
    /// small enough become single leaves; larger runs are sorted on the
    /// given axis, cut into near-equal groups, and packed recursively on
    /// the next axis. A parent sits one level above its tallest child.
    fn pack(&mut self, entries: &mut [(Rectangle, u64)], axis: usize) -> u64 {
        if entries.len() <= self.max_entries {
            let id = self.allocate_node_id();
            let mut leaf = Node::new(id, 1, self.max_entries);
            for (rectangle, child) in entries.iter() {
                leaf.add_entry(rectangle, *child);
            }
            self.nodes.insert(id, leaf);
            return id;
        }

        entries.sort_by(|a, b| {
            a.0.min()[axis]
                .partial_cmp(&b.0.min()[axis])
                .unwrap_or(Ordering::Equal)
        });

        // At least two groups, or a run larger than a leaf would never
        // shrink.
        let groups = self.min_entries.max(2);
        let chunk_size = entries.len().div_ceil(groups);
        let dimension = self.dimension.expect("bulk load fixed the dimension");
        let next_axis = (axis + 1) % dimension;

        let mut children: Vec<u64> = Vec::new();
        for chunk in entries.chunks_mut(chunk_size) {
            children.push(self.pack(chunk, next_axis));
        }

        let level = 1 + children
            .iter()
            .map(|&id| self.node(id).level())
            .max()
            .expect("a partitioned run has at least two groups");
        let id = self.allocate_node_id();
        let mut node = Node::new(id, level, self.max_entries);
        for &child_id in &children {
            let mbr = self
                .node(child_id)
                .mbr()
                .cloned()
                .expect("packed child has entries");
            node.add_entry(&mbr, child_id);
        }
        self.nodes.insert(id, node);
        id
    }
}
