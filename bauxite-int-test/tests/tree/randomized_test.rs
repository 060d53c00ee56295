//! Randomized comparison against linear-scan references.

use bauxite::{Point, RTree, Rectangle, SpatialIndex};
use bauxite_int_test::test_util::{
    random_point_records, scan_contained, scan_distances, scan_intersecting, scan_nearest, sorted,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_window(rng: &mut StdRng) -> Rectangle {
    let x = rng.gen_range(0.0..90.0);
    let y = rng.gen_range(0.0..90.0);
    let side = rng.gen_range(1.0..20.0);
    Rectangle::from_min_max(vec![x, y], vec![x + side, y + side])
}

fn check_against_scan(
    tree: &RTree<String>,
    records: &[(Rectangle, String)],
    rng: &mut StdRng,
    rounds: usize,
) {
    for _ in 0..rounds {
        let window = random_window(rng);

        let found = tree.intersecting(&window).expect("query");
        assert_eq!(sorted(found), sorted(scan_intersecting(records, &window)));

        let (found, visited) = tree.contained(&window).expect("query");
        assert!(visited >= 1);
        assert_eq!(sorted(found), sorted(scan_contained(records, &window)));
    }

    for _ in 0..rounds {
        let point = Point::new(vec![
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
        ]);

        let found = tree.nearest(&point, f64::INFINITY).expect("query");
        assert_eq!(sorted(found), sorted(scan_nearest(records, &point)));

        let k = rng.gen_range(1..20);
        let found = tree.k_nearest(&point, k).expect("query");
        assert_eq!(found.len(), k.min(records.len()));

        // The returned distances must be a prefix of the sorted distance
        // list; ties at the boundary may resolve to either record.
        let mut got: Vec<f64> = found
            .iter()
            .map(|name| {
                records
                    .iter()
                    .find(|(_, n)| n == name)
                    .map(|(rect, _)| rect.minimal_distance_to(&point))
                    .expect("result is a known record")
            })
            .collect();
        got.sort_by(|a, b| a.total_cmp(b));
        let all = scan_distances(records, &point);
        assert_eq!(got, all[..got.len()]);
    }
}

#[test]
fn test_queries_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0xB0C5);
    let mut records = random_point_records(&mut rng, 500, 100.0);

    let mut tree = RTree::new(8, 4).expect("valid configuration");
    for (rect, name) in &records {
        tree.insert(rect, name.clone()).expect("insert");
    }
    assert_eq!(tree.size(), records.len());

    check_against_scan(&tree, &records, &mut rng, 40);

    // Drop every other record and verify the survivors again.
    for index in (0..records.len()).step_by(2).rev() {
        let (rect, name) = records.swap_remove(index);
        assert!(tree.remove(&rect, &name).expect("remove"));
    }
    assert_eq!(tree.size(), records.len());

    check_against_scan(&tree, &records, &mut rng, 40);
}

#[test]
fn test_wide_rectangles_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0xA11E);
    let mut records = Vec::new();
    for index in 0..200 {
        let x = rng.gen_range(0.0..80.0);
        let y = rng.gen_range(0.0..80.0);
        let w = rng.gen_range(0.0..20.0);
        let h = rng.gen_range(0.0..20.0);
        let rect = Rectangle::from_min_max(vec![x, y], vec![x + w, y + h]);
        records.push((rect, format!("record_{index}")));
    }

    let mut tree = RTree::new(6, 3).expect("valid configuration");
    for (rect, name) in &records {
        tree.insert(rect, name.clone()).expect("insert");
    }

    check_against_scan(&tree, &records, &mut rng, 40);
}
