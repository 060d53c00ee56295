//! Shared helpers for integration tests: record builders and linear-scan
//! reference queries to compare the index against.

use bauxite::{Point, Rectangle};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::Rng;

/// A degenerate rectangle at (x, y).
pub fn point_rect(x: f64, y: f64) -> Rectangle {
    Rectangle::from_point(&Point::new(vec![x, y]))
}

/// `count` random 2D point records named `record_<index>`, drawn from
/// `[0, range)` per axis.
pub fn random_point_records(
    rng: &mut StdRng,
    count: usize,
    range: f64,
) -> Vec<(Rectangle, String)> {
    (0..count)
        .map(|index| {
            let rect = point_rect(rng.gen_range(0.0..range), rng.gen_range(0.0..range));
            (rect, format!("record_{index}"))
        })
        .collect()
}

/// Names of the records intersecting the window, by linear scan.
pub fn scan_intersecting(records: &[(Rectangle, String)], window: &Rectangle) -> Vec<String> {
    records
        .iter()
        .filter(|(rect, _)| rect.intersects_with(window))
        .map(|(_, name)| name.clone())
        .collect()
}

/// Names of the records contained in the window, by linear scan.
pub fn scan_contained(records: &[(Rectangle, String)], window: &Rectangle) -> Vec<String> {
    records
        .iter()
        .filter(|(rect, _)| window.contains(rect))
        .map(|(_, name)| name.clone())
        .collect()
}

/// Names of the records tied at the minimum distance to `point`, by linear
/// scan. Empty for an empty record set.
pub fn scan_nearest(records: &[(Rectangle, String)], point: &Point) -> Vec<String> {
    let best = records
        .iter()
        .map(|(rect, _)| rect.minimal_distance_to(point))
        .fold(f64::INFINITY, f64::min);
    records
        .iter()
        .filter(|(rect, _)| rect.minimal_distance_to(point) == best)
        .map(|(_, name)| name.clone())
        .collect()
}

/// Record distances to `point` in ascending order, by linear scan.
pub fn scan_distances(records: &[(Rectangle, String)], point: &Point) -> Vec<f64> {
    let mut distances: Vec<f64> = records
        .iter()
        .map(|(rect, _)| rect.minimal_distance_to(point))
        .collect();
    distances.sort_by(|a, b| a.total_cmp(b));
    distances
}

/// Sorts and returns the names, for order-insensitive comparison.
pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

/// Solid-color test images, `per_category` for each (category, color) pair,
/// named `<category>_<index>`. Images of one category share their color, so
/// their histogram features coincide exactly.
pub fn category_images(
    categories: &[(&str, [u8; 3])],
    per_category: usize,
) -> Vec<(String, RgbImage)> {
    let mut images = Vec::new();
    for (category, color) in categories {
        for index in 0..per_category {
            let image = RgbImage::from_pixel(8, 8, Rgb(*color));
            images.push((format!("{category}_{index}"), image));
        }
    }
    images
}
