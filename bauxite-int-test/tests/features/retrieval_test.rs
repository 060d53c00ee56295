//! Image features driving the index end to end: extract, insert, retrieve.

use bauxite::{Point, RTree, Rectangle, SpatialIndex};
use bauxite_features::{binary_grid, hsl_histogram, rgb_histogram};
use bauxite_int_test::test_util::category_images;
use image::{Rgb, RgbImage};

#[test]
fn test_rgb_histogram_retrieval_by_category() {
    let images = category_images(
        &[
            ("sky", [60, 120, 220]),
            ("grass", [40, 180, 60]),
            ("sand", [220, 200, 120]),
        ],
        4,
    );

    let mut tree = RTree::new(8, 4).expect("valid configuration");
    let mut features = Vec::new();
    for (name, image) in &images {
        let feature = rgb_histogram(image, 4).expect("histogram");
        let point = Point::new(feature);
        tree.insert(&Rectangle::from_point(&point), name.clone())
            .expect("insert");
        features.push((name.clone(), point));
    }
    assert_eq!(tree.size(), 12);

    // Images of one category share their feature vector, so retrieving
    // four neighbors returns exactly the category.
    for (name, point) in &features {
        let results = tree.k_nearest(point, 4).expect("query");
        assert_eq!(results.len(), 4);
        let category = name.split('_').next().expect("category prefix");
        for result in &results {
            assert!(
                result.starts_with(category),
                "{result} retrieved for {name}"
            );
        }
    }
}

#[test]
fn test_hsl_histogram_separates_hues() {
    let red = RgbImage::from_pixel(8, 8, Rgb([200, 30, 30]));
    let green = RgbImage::from_pixel(8, 8, Rgb([30, 200, 30]));
    let blue = RgbImage::from_pixel(8, 8, Rgb([30, 30, 200]));

    let mut tree = RTree::new(4, 2).expect("valid configuration");
    for (name, image) in [("red", &red), ("green", &green), ("blue", &blue)] {
        let feature = hsl_histogram(image, 12).expect("histogram");
        tree.insert(&Rectangle::from_point(&Point::new(feature)), name)
            .expect("insert");
    }

    // A slightly darker red still lands nearest the red prototype.
    let probe = hsl_histogram(&RgbImage::from_pixel(8, 8, Rgb([180, 40, 40])), 12)
        .expect("histogram");
    let found = tree
        .nearest(&Point::new(probe), f64::INFINITY)
        .expect("query");
    assert_eq!(found, vec!["red"]);
}

#[test]
fn test_grid_features_separate_shapes() {
    let left_dark = RgbImage::from_fn(8, 8, |x, _| {
        if x < 4 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let top_dark = RgbImage::from_fn(8, 8, |_, y| {
        if y < 4 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });

    let left_feature = binary_grid(&left_dark, 2, 2).expect("grid");
    let top_feature = binary_grid(&top_dark, 2, 2).expect("grid");
    // Cells are reported column-major.
    assert_eq!(left_feature, vec![1.0, 1.0, 0.0, 0.0]);
    assert_eq!(top_feature, vec![1.0, 0.0, 1.0, 0.0]);

    let mut tree = RTree::new(4, 2).expect("valid configuration");
    tree.insert(
        &Rectangle::from_point(&Point::new(left_feature)),
        "left",
    )
    .expect("insert");
    tree.insert(&Rectangle::from_point(&Point::new(top_feature)), "top")
        .expect("insert");

    let probe = Point::new(vec![1.0, 0.9, 0.1, 0.0]);
    let found = tree.nearest(&probe, f64::INFINITY).expect("query");
    assert_eq!(found, vec!["left"]);
}
