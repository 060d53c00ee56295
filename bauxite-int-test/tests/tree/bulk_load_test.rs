//! Bulk construction compared against incremental construction.

use bauxite::{Point, RTree, Rectangle, SpatialIndex};
use bauxite_int_test::test_util::{point_rect, random_point_records, sorted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_bulk_load_matches_incremental_queries() {
    let mut rng = StdRng::seed_from_u64(0xB17);
    let records = random_point_records(&mut rng, 300, 50.0);

    let bulk_records: Vec<(Point, String)> = records
        .iter()
        .map(|(rect, name)| (Point::new(rect.min().to_vec()), name.clone()))
        .collect();
    let bulk = RTree::bulk_load(8, 4, bulk_records).expect("bulk load");
    assert_eq!(bulk.size(), records.len());
    assert_eq!(bulk.stats().splits, 0);

    let mut incremental = RTree::new(8, 4).expect("valid configuration");
    for (rect, name) in &records {
        incremental.insert(rect, name.clone()).expect("insert");
    }

    for _ in 0..40 {
        let x = rng.gen_range(0.0..45.0);
        let y = rng.gen_range(0.0..45.0);
        let window = Rectangle::from_min_max(vec![x, y], vec![x + 5.0, y + 5.0]);
        assert_eq!(
            sorted(bulk.intersecting(&window).expect("query")),
            sorted(incremental.intersecting(&window).expect("query"))
        );
    }

    for _ in 0..40 {
        let point = Point::new(vec![rng.gen_range(0.0..50.0), rng.gen_range(0.0..50.0)]);
        assert_eq!(
            sorted(bulk.nearest(&point, f64::INFINITY).expect("query")),
            sorted(incremental.nearest(&point, f64::INFINITY).expect("query"))
        );
    }
}

#[test]
fn test_bulk_load_then_mutate() {
    let records: Vec<(Point, String)> = (0..50)
        .map(|i| (Point::new(vec![i as f64, 0.0]), i.to_string()))
        .collect();
    let mut tree = RTree::bulk_load(4, 2, records).expect("bulk load");

    tree.insert(&point_rect(50.0, 0.0), "50".to_string())
        .expect("insert");
    assert!(tree
        .remove(&point_rect(25.0, 0.0), &"25".to_string())
        .expect("remove"));
    assert_eq!(tree.size(), 50);

    let window = Rectangle::from_min_max(vec![24.0, -1.0], vec![26.0, 1.0]);
    let found = tree.intersecting(&window).expect("query");
    assert_eq!(sorted(found), vec!["24", "26"]);
}

#[test]
fn test_bulk_load_empty_and_single() {
    let empty: Vec<(Point, String)> = Vec::new();
    let tree = RTree::bulk_load(8, 4, empty).expect("bulk load");
    assert!(tree.is_empty());

    let single = vec![(Point::new(vec![3.0, 4.0]), "only".to_string())];
    let tree = RTree::bulk_load(8, 4, single).expect("bulk load");
    assert_eq!(tree.size(), 1);
    let found = tree
        .nearest(&Point::new(vec![0.0, 0.0]), 5.0)
        .expect("query");
    assert_eq!(found, vec!["only"]);
}
