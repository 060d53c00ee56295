//! Dynamic R-tree over an id-indexed node arena.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{SpatialError, SpatialResult};
use crate::point::Point;
use crate::rectangle::Rectangle;
use crate::spatial_index::SpatialIndex;

use super::node::Node;

/// Default node capacity, matching the experiment harness defaults.
pub const DEFAULT_MAX_ENTRIES: usize = 30;
/// Default minimum fill per node.
pub const DEFAULT_MIN_ENTRIES: usize = 12;

/// Counters describing the tree's shape and the work done building it.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexStats {
    /// Number of records currently indexed.
    pub record_count: usize,
    /// Number of live nodes in the arena.
    pub node_count: usize,
    /// Tree height; leaves sit at level 1 and the root at level `height`.
    pub height: u32,
    /// Node splits performed since construction.
    pub splits: u64,
    /// Entries reinserted by deletion condensation since construction.
    pub reinsertions: u64,
}

/// An R-tree spatial index over axis-aligned rectangles in arbitrary fixed
/// dimension.
///
/// All nodes live in an id-indexed arena owned by the tree and reference
/// each other only by integer id. Items are arbitrary `Clone + Eq + Hash`
/// values mapped to synthetic `u64` ids; a record is a (rectangle, item)
/// pair. The tree's dimension is fixed by the first record inserted and
/// every later rectangle or point must match it.
///
/// Insertion follows Guttman's algorithms: least-enlargement subtree
/// choice, quadratic node splitting, and upward MBR adjustment. Deletion
/// condenses underfull nodes and reinserts their surviving entries at their
/// original level.
pub struct RTree<T> {
    pub(super) max_entries: usize,
    pub(super) min_entries: usize,
    pub(super) dimension: Option<usize>,
    pub(super) nodes: HashMap<u64, Node>,
    pub(super) root_id: u64,
    pub(super) height: u32,
    pub(super) item_of_id: HashMap<u64, T>,
    pub(super) id_of_item: HashMap<T, u64>,
    /// Single id counter shared by node ids and item ids. Node ids recycle
    /// through the free-list; item ids are always fresh.
    pub(super) next_id: u64,
    pub(super) freed_node_ids: Vec<u64>,
    pub(super) splits: u64,
    pub(super) reinsertions: u64,
}

impl<T: Clone + Eq + Hash> RTree<T> {
    /// Creates an empty tree with the given node capacity configuration.
    ///
    /// Requires `max_entries >= 2`, `min_entries >= 1` and
    /// `min_entries <= max_entries / 2`.
    pub fn new(max_entries: usize, min_entries: usize) -> SpatialResult<Self> {
        if max_entries < 2 {
            return Err(SpatialError::InvalidConfiguration(format!(
                "max_entries must be at least 2, got {max_entries}"
            )));
        }
        if min_entries < 1 {
            return Err(SpatialError::InvalidConfiguration(format!(
                "min_entries must be at least 1, got {min_entries}"
            )));
        }
        if min_entries > max_entries / 2 {
            return Err(SpatialError::InvalidConfiguration(format!(
                "min_entries must not exceed max_entries / 2 ({min_entries} > {})",
                max_entries / 2
            )));
        }

        let mut nodes = HashMap::new();
        nodes.insert(0, Node::new(0, 1, max_entries));

        Ok(RTree {
            max_entries,
            min_entries,
            dimension: None,
            nodes,
            root_id: 0,
            height: 1,
            item_of_id: HashMap::new(),
            id_of_item: HashMap::new(),
            next_id: 1,
            freed_node_ids: Vec::new(),
            splits: 0,
            reinsertions: 0,
        })
    }

    /// Tree height; 1 for a tree that is a single leaf.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.item_of_id.is_empty()
    }

    /// Bounding rectangle of the whole tree, `None` when empty.
    pub fn root_bounding_box(&self) -> Option<Rectangle> {
        self.node(self.root_id).mbr().cloned()
    }

    /// Snapshot of the tree's shape and operation counters.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            record_count: self.item_of_id.len(),
            node_count: self.nodes.len(),
            height: self.height,
            splits: self.splits,
            reinsertions: self.reinsertions,
        }
    }

    pub(super) fn node(&self, id: u64) -> &Node {
        self.nodes.get(&id).expect("node id points into the arena")
    }

    pub(super) fn node_mut(&mut self, id: u64) -> &mut Node {
        self.nodes.get_mut(&id).expect("node id points into the arena")
    }

    fn item(&self, id: u64) -> T {
        self.item_of_id
            .get(&id)
            .expect("leaf entry id points into the item map")
            .clone()
    }

    pub(super) fn allocate_node_id(&mut self) -> u64 {
        if let Some(id) = self.freed_node_ids.pop() {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(super) fn allocate_item_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(super) fn free_node(&mut self, id: u64) -> Node {
        let node = self.nodes.remove(&id).expect("node id points into the arena");
        self.freed_node_ids.push(id);
        node
    }

    /// Fixes the tree dimension on first use and rejects mismatches after.
    fn ensure_dimension(&mut self, dimension: usize) -> SpatialResult<()> {
        match self.dimension {
            None => {
                self.dimension = Some(dimension);
                Ok(())
            }
            Some(expected) if expected == dimension => Ok(()),
            Some(expected) => Err(SpatialError::DimensionMismatch {
                expected,
                found: dimension,
            }),
        }
    }

    /// Read-only dimension check for queries; passes while no record has
    /// fixed a dimension yet.
    fn check_dimension(&self, dimension: usize) -> SpatialResult<()> {
        match self.dimension {
            Some(expected) if expected != dimension => Err(SpatialError::DimensionMismatch {
                expected,
                found: dimension,
            }),
            _ => Ok(()),
        }
    }

    /// Inserts an entry at the given tree level. Fresh records enter at
    /// level 1; condensation reinserts orphaned entries at the level of the
    /// node they came from.
    fn insert_at_level(&mut self, rectangle: &Rectangle, child: u64, level: u32) {
        let mut path_nodes: Vec<u64> = Vec::new();
        let mut path_entries: Vec<usize> = Vec::new();
        let target = self.choose_subtree(rectangle, level, &mut path_nodes, &mut path_entries);

        if self.node(target).is_full() {
            let sibling = self.split_node(target, rectangle, child);
            self.adjust_tree(&path_nodes, &path_entries, Some(sibling));
        } else {
            self.node_mut(target).add_entry(rectangle, child);
            self.adjust_tree(&path_nodes, &path_entries, None);
        }
    }

    /// Descends from the root to the insertion target at `level`, picking
    /// at each step the child whose rectangle needs the least enlargement
    /// (ties broken by smaller area) and recording the (node id, entry
    /// index) path on the two parallel stacks.
    fn choose_subtree(
        &self,
        rectangle: &Rectangle,
        level: u32,
        path_nodes: &mut Vec<u64>,
        path_entries: &mut Vec<usize>,
    ) -> u64 {
        let mut current = self.root_id;
        loop {
            let node = self.node(current);
            if node.level() <= level {
                return current;
            }

            let mut best_index = usize::MAX;
            let mut best_enlargement = f64::INFINITY;
            let mut best_area = f64::INFINITY;
            for i in 0..node.entry_count() {
                // A child rooted below the target level cannot host the
                // entry; branch depths vary in bulk-loaded trees.
                if level > 1 && self.node(node.child_id(i)).level() < level {
                    continue;
                }
                let entry = node.entry(i);
                let enlargement = entry.enlargement(rectangle);
                let area = entry.area();
                if enlargement < best_enlargement
                    || (enlargement == best_enlargement && area < best_area)
                {
                    best_enlargement = enlargement;
                    best_area = area;
                    best_index = i;
                }
            }
            if best_index == usize::MAX {
                // No child reaches down to the target level; host the entry
                // here instead.
                return current;
            }

            path_nodes.push(current);
            path_entries.push(best_index);
            current = node.child_id(best_index);
        }
    }

    /// Quadratic split of a full node to make room for one more entry.
    ///
    /// The node's `max_entries` occupied slots plus the incoming entry are
    /// distributed over two groups seeded per Guttman: on the axis with the
    /// best normalized separation, the entry with the lowest high boundary
    /// anchors the original node (reused in place) and the entry with the
    /// highest low boundary anchors a freshly allocated sibling. Returns
    /// the sibling's id.
    fn split_node(&mut self, node_id: u64, extra_rect: &Rectangle, extra_child: u64) -> u64 {
        let count = self.max_entries;
        let level = self.node(node_id).level();

        // Scratch view of the rectangles being distributed; index `count`
        // stands for the incoming entry.
        let mut rects: Vec<Rectangle> = Vec::with_capacity(count + 1);
        {
            let node = self.node(node_id);
            for i in 0..count {
                rects.push(node.entry(i).clone());
            }
        }
        rects.push(extra_rect.clone());

        let mut total = rects[0].clone();
        for rect in &rects[1..] {
            total.add_rectangle(rect);
        }

        // Pick seeds: per axis, the entry with the highest low boundary
        // against the entry with the lowest high boundary, separation
        // normalized by the total extent on that axis.
        let mut best_separation = f64::NEG_INFINITY;
        let mut seed_sibling = 0;
        let mut seed_original = 1;
        for axis in 0..total.dimension() {
            let mut highest_low = 0;
            for (i, rect) in rects.iter().enumerate().skip(1) {
                if rect.min()[axis] > rects[highest_low].min()[axis] {
                    highest_low = i;
                }
            }
            let mut lowest_high = usize::MAX;
            for (i, rect) in rects.iter().enumerate() {
                if i == highest_low {
                    continue;
                }
                if lowest_high == usize::MAX
                    || rect.max()[axis] < rects[lowest_high].max()[axis]
                {
                    lowest_high = i;
                }
            }
            let extent = total.extent(axis);
            let separation = if extent == 0.0 {
                1.0
            } else {
                (rects[highest_low].min()[axis] - rects[lowest_high].max()[axis]) / extent
            };
            if separation > best_separation {
                best_separation = separation;
                seed_sibling = highest_low;
                seed_original = lowest_high;
            }
        }

        // Distribute the remaining entries in array order. Strictly smaller
        // enlargement wins; ties go to the smaller group rectangle, then to
        // the group with fewer entries, and finally to the original node.
        // A group that must take everything left to reach the minimum fill
        // takes it without comparison.
        let mut to_sibling = vec![false; rects.len()];
        to_sibling[seed_sibling] = true;
        let mut original_mbr = rects[seed_original].clone();
        let mut sibling_mbr = rects[seed_sibling].clone();
        let mut original_count = 1usize;
        let mut sibling_count = 1usize;

        let remaining: Vec<usize> = (0..rects.len())
            .filter(|&i| i != seed_original && i != seed_sibling)
            .collect();
        for (pos, &i) in remaining.iter().enumerate() {
            let left = remaining.len() - pos;
            if original_count + left == self.min_entries {
                original_count += left;
                break;
            }
            if sibling_count + left == self.min_entries {
                for &j in &remaining[pos..] {
                    to_sibling[j] = true;
                }
                sibling_count += left;
                break;
            }

            let to_original = original_mbr.enlargement(&rects[i]);
            let to_sib = sibling_mbr.enlargement(&rects[i]);
            let goes_to_sibling = if to_sib < to_original {
                true
            } else if to_original < to_sib {
                false
            } else if sibling_mbr.area() != original_mbr.area() {
                sibling_mbr.area() < original_mbr.area()
            } else {
                sibling_count < original_count
            };

            if goes_to_sibling {
                to_sibling[i] = true;
                sibling_mbr.add_rectangle(&rects[i]);
                sibling_count += 1;
            } else {
                original_mbr.add_rectangle(&rects[i]);
                original_count += 1;
            }
        }

        // Move the sibling group over, seed first, leaving holes in the
        // original node; then compact what stayed.
        let sibling_id = self.allocate_node_id();
        let mut sibling = Node::new(sibling_id, level, self.max_entries);
        if seed_sibling == count {
            sibling.add_entry(extra_rect, extra_child);
        } else {
            let (rectangle, child) = self.node_mut(node_id).take_entry(seed_sibling);
            sibling.add_entry(&rectangle, child);
        }
        for i in 0..count {
            if to_sibling[i] && i != seed_sibling {
                let (rectangle, child) = self.node_mut(node_id).take_entry(i);
                sibling.add_entry(&rectangle, child);
            }
        }
        if to_sibling[count] && seed_sibling != count {
            sibling.add_entry(extra_rect, extra_child);
        }
        self.nodes.insert(sibling_id, sibling);

        let node = self.node_mut(node_id);
        node.shrink();
        node.recompute_mbr();
        if !to_sibling[count] {
            node.add_entry(extra_rect, extra_child);
        }

        self.splits += 1;
        debug!(
            "split node {node_id} at level {level} into {original_count} + {sibling_count} entries (sibling {sibling_id})"
        );
        sibling_id
    }

    /// Walks the recorded insertion path upward, tightening each ancestor's
    /// stored child rectangle and inserting pending split siblings into
    /// their parents. Stops early once nothing changes and no split is
    /// pending; a split bubbling out of the root grows the tree.
    fn adjust_tree(&mut self, path_nodes: &[u64], path_entries: &[usize], mut split: Option<u64>) {
        for (&parent_id, &entry_index) in path_nodes.iter().zip(path_entries.iter()).rev() {
            let child_id = self.node(parent_id).child_id(entry_index);
            let child_mbr = self
                .node(child_id)
                .mbr()
                .cloned()
                .expect("child on the insertion path has entries");
            let mut changed = self.node_mut(parent_id).update_entry(entry_index, &child_mbr);

            if let Some(sibling_id) = split.take() {
                let sibling_mbr = self
                    .node(sibling_id)
                    .mbr()
                    .cloned()
                    .expect("split sibling has entries");
                if self.node(parent_id).is_full() {
                    split = Some(self.split_node(parent_id, &sibling_mbr, sibling_id));
                } else {
                    self.node_mut(parent_id).add_entry(&sibling_mbr, sibling_id);
                }
                changed = true;
            }

            if !changed && split.is_none() {
                return;
            }
        }

        if let Some(sibling_id) = split {
            self.grow_root(sibling_id);
        }
    }

    /// Creates a new root over the old root and its split sibling.
    fn grow_root(&mut self, sibling_id: u64) {
        let old_root_mbr = self
            .node(self.root_id)
            .mbr()
            .cloned()
            .expect("split root has entries");
        let sibling_mbr = self
            .node(sibling_id)
            .mbr()
            .cloned()
            .expect("split sibling has entries");

        let new_root_id = self.allocate_node_id();
        self.height += 1;
        let mut new_root = Node::new(new_root_id, self.height, self.max_entries);
        new_root.add_entry(&old_root_mbr, self.root_id);
        new_root.add_entry(&sibling_mbr, sibling_id);
        self.nodes.insert(new_root_id, new_root);
        self.root_id = new_root_id;
        debug!("root split; new root {new_root_id} at height {}", self.height);
    }

    /// Walks from a shrunken leaf back to the root. Nodes that fell below
    /// the minimum fill are detached from their parent and queued; nodes
    /// that still qualify get their parent entry tightened. Queued nodes'
    /// surviving entries are then reinserted at their original level,
    /// highest level first.
    fn condense_tree(&mut self, leaf_id: u64, ancestors: &[(u64, usize)]) {
        let mut orphans: Vec<Node> = Vec::new();

        let mut child_id = leaf_id;
        for &(parent_id, resume) in ancestors.iter().rev() {
            // The resume index sits one past the entry we descended through.
            let entry_index = resume - 1;
            debug_assert_eq!(self.node(parent_id).child_id(entry_index), child_id);

            if self.node(child_id).is_underfull(self.min_entries) {
                self.node_mut(parent_id).remove_entry(entry_index);
                let orphan = self.free_node(child_id);
                debug!(
                    "condensing node {} at level {} ({} entries to reinsert)",
                    orphan.id(),
                    orphan.level(),
                    orphan.entry_count()
                );
                orphans.push(orphan);
            } else {
                let child_mbr = self
                    .node(child_id)
                    .mbr()
                    .cloned()
                    .expect("node meeting the minimum fill has entries");
                self.node_mut(parent_id).update_entry(entry_index, &child_mbr);
            }
            child_id = parent_id;
        }

        while let Some(orphan) = orphans.pop() {
            self.reinsertions += orphan.entry_count() as u64;
            for i in 0..orphan.entry_count() {
                self.insert_at_level(orphan.entry(i), orphan.child_id(i), orphan.level());
            }
        }
    }

    /// Branch-and-bound nearest-entry descent shared by `nearest` and
    /// `k_nearest`. Leaf entries strictly closer than `best` replace the
    /// collected set and tighten the bound; entries tied with it
    /// accumulate. Entries at distances at or below `lower_bound` are
    /// excluded so earlier rounds' classes are not recollected.
    fn collect_nearest(
        &self,
        node_id: u64,
        point: &Point,
        lower_bound: f64,
        best: &mut f64,
        found: &mut Vec<u64>,
    ) {
        let node = self.node(node_id);
        if node.is_leaf() {
            for i in 0..node.entry_count() {
                let distance = node.entry(i).minimal_distance_to(point);
                if distance <= lower_bound {
                    continue;
                }
                if distance < *best {
                    *best = distance;
                    found.clear();
                    found.push(node.child_id(i));
                } else if distance == *best {
                    found.push(node.child_id(i));
                }
            }
        } else {
            for i in 0..node.entry_count() {
                if node.entry(i).minimal_distance_to(point) <= *best {
                    self.collect_nearest(node.child_id(i), point, lower_bound, best, found);
                }
            }
        }
    }

    fn collect_intersecting(&self, node_id: u64, query: &Rectangle, found: &mut Vec<T>) {
        let node = self.node(node_id);
        if node.is_leaf() {
            for i in 0..node.entry_count() {
                if node.entry(i).intersects_with(query) {
                    found.push(self.item(node.child_id(i)));
                }
            }
        } else {
            for i in 0..node.entry_count() {
                if node.entry(i).intersects_with(query) {
                    self.collect_intersecting(node.child_id(i), query, found);
                }
            }
        }
    }
}

impl<T: Clone + Eq + Hash> Default for RTree<T> {
    fn default() -> Self {
        RTree::new(DEFAULT_MAX_ENTRIES, DEFAULT_MIN_ENTRIES)
            .expect("default configuration is valid")
    }
}

// ============================================================================
// SpatialIndex trait implementation
// ============================================================================

impl<T: Clone + Eq + Hash> SpatialIndex<T> for RTree<T> {
    fn insert(&mut self, rectangle: &Rectangle, item: T) -> SpatialResult<()> {
        self.ensure_dimension(rectangle.dimension())?;

        let item_id = self.allocate_item_id();
        self.item_of_id.insert(item_id, item.clone());
        self.id_of_item.insert(item, item_id);
        self.insert_at_level(rectangle, item_id, 1);
        Ok(())
    }

    fn remove(&mut self, rectangle: &Rectangle, item: &T) -> SpatialResult<bool> {
        self.check_dimension(rectangle.dimension())?;
        let item_id = match self.id_of_item.get(item) {
            Some(&id) => id,
            None => return Ok(false),
        };

        // Find the leaf holding the record: iterative containment descent
        // with (node id, resume index) frames, backtracking through
        // exhausted nodes.
        let mut stack: Vec<(u64, usize)> = vec![(self.root_id, 0)];
        let mut found: Option<(u64, usize)> = None;
        while let Some(&(node_id, start)) = stack.last() {
            let node = self.node(node_id);
            if node.is_leaf() {
                if let Some(index) = node.find_entry(rectangle, item_id) {
                    found = Some((node_id, index));
                    break;
                }
                stack.pop();
                continue;
            }
            let mut descended = false;
            for i in start..node.entry_count() {
                if node.entry(i).contains(rectangle) {
                    stack.last_mut().expect("stack is non-empty").1 = i + 1;
                    stack.push((node.child_id(i), 0));
                    descended = true;
                    break;
                }
            }
            if !descended {
                stack.pop();
            }
        }

        let (leaf_id, entry_index) = match found {
            Some(hit) => hit,
            None => return Ok(false),
        };

        // Drop the leaf frame; the rest of the stack is the ancestor path.
        stack.pop();
        self.node_mut(leaf_id).remove_entry(entry_index);
        self.condense_tree(leaf_id, &stack);

        // A root left with a single child hands the tree over to it.
        while self.height > 1 && self.node(self.root_id).entry_count() == 1 {
            let child_id = self.node(self.root_id).child_id(0);
            self.free_node(self.root_id);
            self.root_id = child_id;
            self.height = self.node(child_id).level();
            debug!("root collapsed onto node {child_id} at height {}", self.height);
        }

        self.item_of_id.remove(&item_id);
        self.id_of_item.remove(item);
        Ok(true)
    }

    fn intersecting(&self, query: &Rectangle) -> SpatialResult<Vec<T>> {
        self.check_dimension(query.dimension())?;
        let mut found = Vec::new();
        self.collect_intersecting(self.root_id, query, &mut found);
        Ok(found)
    }

    fn contained(&self, query: &Rectangle) -> SpatialResult<(Vec<T>, u64)> {
        self.check_dimension(query.dimension())?;
        let mut found = Vec::new();
        let mut visited: u64 = 0;

        let mut stack: Vec<(u64, usize)> = vec![(self.root_id, 0)];
        while let Some(&(node_id, start)) = stack.last() {
            let node = self.node(node_id);
            if start == 0 {
                visited += 1;
            }
            if node.is_leaf() {
                for i in 0..node.entry_count() {
                    if query.contains(node.entry(i)) {
                        found.push(self.item(node.child_id(i)));
                    }
                }
                stack.pop();
                continue;
            }
            let mut descended = false;
            for i in start..node.entry_count() {
                if query.contains(node.entry(i)) {
                    stack.last_mut().expect("stack is non-empty").1 = i + 1;
                    stack.push((node.child_id(i), 0));
                    descended = true;
                    break;
                }
            }
            if !descended {
                stack.pop();
            }
        }

        Ok((found, visited))
    }

    fn nearest(&self, point: &Point, distance_limit: f64) -> SpatialResult<Vec<T>> {
        self.check_dimension(point.dimension())?;
        let mut best = distance_limit;
        let mut found = Vec::new();
        self.collect_nearest(self.root_id, point, f64::NEG_INFINITY, &mut best, &mut found);
        Ok(found.iter().map(|&id| self.item(id)).collect())
    }

    fn k_nearest(&self, point: &Point, k: usize) -> SpatialResult<Vec<T>> {
        self.check_dimension(point.dimension())?;
        let want = k.min(self.item_of_id.len());
        let mut collected: Vec<u64> = Vec::with_capacity(want);
        let mut lower_bound = f64::NEG_INFINITY;

        // Each round collects one tied-distance class past the previous
        // bound; the final round may straddle the quota, in which case the
        // first entries in traversal order are kept.
        while collected.len() < want {
            let mut best = f64::INFINITY;
            let mut round = Vec::new();
            self.collect_nearest(self.root_id, point, lower_bound, &mut best, &mut round);
            if round.is_empty() {
                break;
            }
            round.truncate(want - collected.len());
            collected.extend(round);
            lower_bound = best;
        }

        Ok(collected.iter().map(|&id| self.item(id)).collect())
    }

    fn size(&self) -> usize {
        self.item_of_id.len()
    }
}
