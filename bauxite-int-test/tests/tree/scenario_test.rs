//! Scenario tests over a small line of point records.

use bauxite::{Point, RTree, Rectangle, SpatialIndex};
use bauxite_int_test::test_util::{point_rect, sorted};

fn digits_tree() -> RTree<String> {
    let mut tree = RTree::new(4, 2).expect("valid configuration");
    for i in 0..10 {
        tree.insert(&point_rect(i as f64, 0.0), i.to_string())
            .expect("insert");
    }
    tree
}

#[test]
fn test_window_query() {
    let tree = digits_tree();
    let window = Rectangle::from_min_max(vec![2.0, -1.0], vec![5.0, 1.0]);
    let found = tree.intersecting(&window).expect("query");
    assert_eq!(sorted(found), vec!["2", "3", "4", "5"]);
}

#[test]
fn test_remove_then_requery() {
    let mut tree = digits_tree();
    let removed = tree
        .remove(&point_rect(3.0, 0.0), &"3".to_string())
        .expect("remove");
    assert!(removed);
    assert_eq!(tree.size(), 9);

    let window = Rectangle::from_min_max(vec![2.0, -1.0], vec![5.0, 1.0]);
    let found = tree.intersecting(&window).expect("query");
    assert_eq!(sorted(found), vec!["2", "4", "5"]);
}

#[test]
fn test_remove_absent_record_is_not_an_error() {
    let mut tree = digits_tree();
    let removed = tree
        .remove(&point_rect(3.5, 0.0), &"3".to_string())
        .expect("remove");
    assert!(!removed);
    assert_eq!(tree.size(), 10);
}

#[test]
fn test_nearest_tie() {
    let tree = digits_tree();
    let found = tree
        .nearest(&Point::new(vec![2.5, 0.0]), f64::INFINITY)
        .expect("query");
    assert_eq!(sorted(found), vec!["2", "3"]);
}

#[test]
fn test_k_nearest_collects_distance_classes() {
    let tree = digits_tree();
    let found = tree
        .k_nearest(&Point::new(vec![4.5, 0.0]), 4)
        .expect("query");
    assert_eq!(sorted(found), vec!["3", "4", "5", "6"]);
}

#[test]
fn test_contained_reports_visits() {
    let tree = digits_tree();
    let window = Rectangle::from_min_max(vec![-1.0, -1.0], vec![10.0, 1.0]);
    let (found, visited) = tree.contained(&window).expect("query");
    assert_eq!(found.len(), 10);
    assert!(visited >= 1);
}

#[test]
fn test_duplicate_item_values() {
    let mut tree = RTree::new(4, 2).expect("valid configuration");
    tree.insert(&point_rect(1.0, 1.0), "dup".to_string())
        .expect("insert");
    tree.insert(&point_rect(2.0, 2.0), "dup".to_string())
        .expect("insert");
    assert_eq!(tree.size(), 2);

    // Removal matches the item's current id, so one record survives.
    assert!(tree
        .remove(&point_rect(2.0, 2.0), &"dup".to_string())
        .expect("remove"));
    assert_eq!(tree.size(), 1);
}

#[test]
fn test_dimension_mismatch_is_rejected() {
    let mut tree = digits_tree();
    let result = tree.insert(
        &Rectangle::from_point(&Point::new(vec![1.0, 2.0, 3.0])),
        "3d".to_string(),
    );
    assert!(result.is_err());
    assert_eq!(tree.size(), 10);
}
