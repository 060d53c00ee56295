//! Fixed-capacity R-tree node.

use crate::rectangle::Rectangle;

/// A node of the tree: parallel fixed-length arrays of entry rectangles and
/// child references, plus a cached bounding rectangle over the occupied
/// slots.
///
/// `children[i]` holds a child node id in internal nodes and a synthetic
/// item id in leaves. Occupied slots form the contiguous prefix
/// `[0, entry_count)` except transiently between `take_entry` calls and the
/// following `shrink`, when holes (`None` slots) may exist anywhere.
#[derive(Debug)]
pub(crate) struct Node {
    id: u64,
    level: u32,
    entry_count: usize,
    entries: Vec<Option<Rectangle>>,
    children: Vec<u64>,
    mbr: Option<Rectangle>,
}

impl Node {
    pub(crate) fn new(id: u64, level: u32, capacity: usize) -> Node {
        Node {
            id,
            level,
            entry_count: 0,
            entries: vec![None; capacity],
            children: vec![0; capacity],
            mbr: None,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    /// Leaves live at level 1; levels increase toward the root.
    pub(crate) fn is_leaf(&self) -> bool {
        self.level == 1
    }

    pub(crate) fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub(crate) fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.entry_count == self.capacity()
    }

    pub(crate) fn is_underfull(&self, min_entries: usize) -> bool {
        self.entry_count < min_entries
    }

    pub(crate) fn mbr(&self) -> Option<&Rectangle> {
        self.mbr.as_ref()
    }

    /// Rectangle of the entry at `index`; the slot must be occupied.
    pub(crate) fn entry(&self, index: usize) -> &Rectangle {
        self.entries[index].as_ref().expect("entry slot is occupied")
    }

    pub(crate) fn child_id(&self, index: usize) -> u64 {
        self.children[index]
    }

    /// Appends an entry at the end of the occupied prefix and grows the
    /// cached MBR in place. The node must be compact and have spare room.
    pub(crate) fn add_entry(&mut self, rectangle: &Rectangle, child: u64) {
        debug_assert!(self.entry_count < self.capacity(), "node is full");
        debug_assert!(
            self.entries[..self.entry_count].iter().all(Option::is_some),
            "node has holes"
        );
        match &mut self.mbr {
            Some(mbr) => mbr.add_rectangle(rectangle),
            None => self.mbr = Some(rectangle.clone()),
        }
        self.entries[self.entry_count] = Some(rectangle.clone());
        self.children[self.entry_count] = child;
        self.entry_count += 1;
    }

    /// Removes and returns the entry at `index`, leaving a hole. The caller
    /// must `shrink` and rebuild the MBR once it is done taking entries.
    pub(crate) fn take_entry(&mut self, index: usize) -> (Rectangle, u64) {
        let rectangle = self.entries[index].take().expect("entry slot is occupied");
        self.entry_count -= 1;
        (rectangle, self.children[index])
    }

    /// Removes the entry at `index` by swapping the last occupied slot into
    /// its place. The cached MBR is rebuilt only when the removed rectangle
    /// touched its boundary.
    pub(crate) fn remove_entry(&mut self, index: usize) -> (Rectangle, u64) {
        let removed = self.entries[index].take().expect("entry slot is occupied");
        let child = self.children[index];
        let last = self.entry_count - 1;
        if index != last {
            self.entries[index] = self.entries[last].take();
            self.children[index] = self.children[last];
        }
        self.entry_count = last;
        if self.entry_count == 0 {
            self.mbr = None;
        } else if self.mbr.as_ref().is_some_and(|mbr| mbr.overlaps_with(&removed)) {
            self.recompute_mbr();
        }
        (removed, child)
    }

    /// Replaces the rectangle at `index`, returning whether it changed. The
    /// cached MBR is rebuilt when the old rectangle touched its boundary and
    /// grown in place otherwise.
    pub(crate) fn update_entry(&mut self, index: usize, rectangle: &Rectangle) -> bool {
        let slot = self.entries[index].as_mut().expect("entry slot is occupied");
        if slot == rectangle {
            return false;
        }
        let old = slot.clone();
        slot.set(rectangle);
        if self.mbr.as_ref().is_some_and(|mbr| mbr.overlaps_with(&old)) {
            self.recompute_mbr();
        } else if let Some(mbr) = &mut self.mbr {
            mbr.add_rectangle(rectangle);
        }
        true
    }

    /// Finds the entry matching both rectangle contents and child reference.
    pub(crate) fn find_entry(&self, rectangle: &Rectangle, child: u64) -> Option<usize> {
        (0..self.entry_count).find(|&i| {
            self.children[i] == child
                && self.entries[i].as_ref().is_some_and(|r| r == rectangle)
        })
    }

    /// Compacts the occupied slots into a hole-free prefix `[0, entry_count)`
    /// by pulling live entries down from the tail. Does not touch the MBR.
    pub(crate) fn shrink(&mut self) {
        let mut last = self.capacity();
        for i in 0..self.entry_count {
            if self.entries[i].is_some() {
                continue;
            }
            last -= 1;
            while self.entries[last].is_none() {
                last -= 1;
            }
            self.entries[i] = self.entries[last].take();
            self.children[i] = self.children[last];
        }
        debug_assert!(
            self.entries[..self.entry_count].iter().all(Option::is_some),
            "node still has holes after shrink"
        );
    }

    /// Rebuilds the cached MBR as the union of all occupied entries.
    pub(crate) fn recompute_mbr(&mut self) {
        let mut mbr: Option<Rectangle> = None;
        for slot in self.entries.iter().flatten() {
            match &mut mbr {
                Some(m) => m.add_rectangle(slot),
                None => mbr = Some(slot.clone()),
            }
        }
        self.mbr = mbr;
    }
}
