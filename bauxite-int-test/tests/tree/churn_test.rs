//! Long mutation sequences: growth, condensation, and root collapse.

use bauxite::{RTree, SpatialIndex};
use bauxite_int_test::test_util::point_rect;

#[test]
fn test_growth_then_removal_collapses_the_tree() {
    let mut tree = RTree::new(4, 2).expect("valid configuration");
    for i in 0..64i32 {
        tree.insert(&point_rect(i as f64, (i % 8) as f64), i)
            .expect("insert");
    }
    assert_eq!(tree.size(), 64);
    assert!(tree.height() > 1);
    assert!(tree.stats().splits > 0);
    let peak_nodes = tree.stats().node_count;

    for i in 0..63i32 {
        let removed = tree
            .remove(&point_rect(i as f64, (i % 8) as f64), &i)
            .expect("remove");
        assert!(removed, "record {i} not found");
    }
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.height(), 1);
    assert!(tree.stats().node_count < peak_nodes);

    assert!(tree
        .remove(&point_rect(63.0, 7.0), &63)
        .expect("remove"));
    assert!(tree.is_empty());
    assert_eq!(tree.stats().node_count, 1);
    assert_eq!(tree.stats().record_count, 0);
}

#[test]
fn test_alternating_insert_and_remove() {
    let mut tree = RTree::new(4, 2).expect("valid configuration");

    for round in 0..8i32 {
        for i in 0..32i32 {
            tree.insert(&point_rect(i as f64, round as f64), i)
                .expect("insert");
        }
        for i in 0..16i32 {
            assert!(tree
                .remove(&point_rect(i as f64, round as f64), &i)
                .expect("remove"));
        }
    }

    // 16 survivors per round.
    assert_eq!(tree.size(), 8 * 16);
    let mbr = tree.root_bounding_box().expect("non-empty tree");
    assert_eq!(mbr.min(), &[16.0, 0.0]);
    assert_eq!(mbr.max(), &[31.0, 7.0]);
}

#[test]
fn test_reinsertions_are_counted() {
    let mut tree = RTree::new(4, 2).expect("valid configuration");
    for i in 0..32i32 {
        tree.insert(&point_rect(i as f64, 0.0), i).expect("insert");
    }
    for i in 0..24i32 {
        assert!(tree.remove(&point_rect(i as f64, 0.0), &i).expect("remove"));
    }
    // Condensing that many removals out of a max=4 tree must have
    // reinserted something.
    assert!(tree.stats().reinsertions > 0);
    assert_eq!(tree.size(), 8);
}
