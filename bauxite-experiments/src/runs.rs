//! Experiment runs over a loaded dataset.
//!
//! Records are indexed as degenerate rectangles (points), with the image
//! name as the item. Retrieval quality is judged by the category encoded
//! in the name prefix.

use std::collections::HashMap;

use anyhow::{ensure, Context, Result};
use bauxite::{RTree, Rectangle, SpatialIndex};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::dataset::{category, Dataset};

fn build_tree(
    dataset: &Dataset,
    order: &[usize],
    max_entries: usize,
    min_entries: usize,
) -> Result<RTree<String>> {
    let mut tree = RTree::new(max_entries, min_entries)?;
    for &index in order {
        let rectangle = Rectangle::from_point(&dataset.points[index]);
        tree.insert(&rectangle, dataset.names[index].clone())?;
    }
    Ok(tree)
}

/// Mean precision of `k_nearest` retrieval by category.
///
/// Each record queries its own position; the record itself is dropped from
/// the results (first occurrence of its name) and the fraction of
/// same-category survivors is averaged. Records left with no neighbors are
/// skipped.
pub fn accuracy(
    dataset: &Dataset,
    k: usize,
    max_entries: usize,
    min_entries: usize,
) -> Result<f64> {
    let order: Vec<usize> = (0..dataset.len()).collect();
    let tree = build_tree(dataset, &order, max_entries, min_entries)?;

    let mut total = 0.0;
    let mut counted = 0usize;
    for (point, name) in dataset.points.iter().zip(&dataset.names) {
        let mut results = tree.k_nearest(point, k)?;
        if let Some(position) = results.iter().position(|result| result == name) {
            results.remove(position);
        }
        if results.is_empty() {
            continue;
        }
        let matches = results
            .iter()
            .filter(|result| category(result) == category(name))
            .count();
        total += matches as f64 / results.len() as f64;
        counted += 1;
    }
    ensure!(counted > 0, "no record had any neighbor besides itself");
    Ok(total / counted as f64)
}

/// Mean recall of `k_nearest` retrieval by category.
///
/// Each record queries with k = size of its own category and the fraction
/// of the category retrieved is averaged. The record itself counts as
/// retrieved.
pub fn recall(dataset: &Dataset, max_entries: usize, min_entries: usize) -> Result<f64> {
    ensure!(dataset.len() > 0, "the dataset is empty");
    let order: Vec<usize> = (0..dataset.len()).collect();
    let tree = build_tree(dataset, &order, max_entries, min_entries)?;

    let mut category_sizes: HashMap<&str, usize> = HashMap::new();
    for name in &dataset.names {
        *category_sizes.entry(category(name)).or_insert(0) += 1;
    }

    let mut total = 0.0;
    for (index, (point, name)) in dataset.points.iter().zip(&dataset.names).enumerate() {
        let size = category_sizes[category(name)];
        let results = tree.k_nearest(point, size)?;
        let matches = results
            .iter()
            .filter(|result| category(result) == category(name))
            .count();
        total += matches as f64 / size as f64;
        if index % 100 == 0 {
            debug!("recall progress: {index} of {}", dataset.len());
        }
    }
    Ok(total / dataset.len() as f64)
}

/// Mean node-visit count of random window queries against a tree built
/// over `size` randomly drawn records.
///
/// Each query window spans `(1/2)^(1/dimension)` of the root MBR extent
/// per axis, placed uniformly at random inside the MBR, so an evenly
/// spread dataset leaves roughly half the records inside the window.
pub fn disk_access(
    dataset: &Dataset,
    size: usize,
    max_entries: usize,
    min_entries: usize,
    queries: usize,
    rng: &mut StdRng,
) -> Result<f64> {
    ensure!(size > 0, "--size must be positive");
    ensure!(
        size <= dataset.len(),
        "--size {size} exceeds the {} dataset records",
        dataset.len()
    );
    ensure!(queries > 0, "--queries must be positive");

    let mut order: Vec<usize> = (0..dataset.len()).collect();
    order.shuffle(rng);
    order.truncate(size);
    let tree = build_tree(dataset, &order, max_entries, min_entries)?;

    let mbr = tree
        .root_bounding_box()
        .context("the tree has no bounding box")?;
    let dimension = mbr.dimension();
    let ratio = 0.5f64.powf(1.0 / dimension as f64);

    let mut visit_sum = 0u64;
    for _ in 0..queries {
        let mut lower = Vec::with_capacity(dimension);
        let mut upper = Vec::with_capacity(dimension);
        for axis in 0..dimension {
            let extent = mbr.extent(axis);
            let side = extent * ratio;
            let start = mbr.min()[axis] + rng.gen_range(0.0..1.0) * (extent - side);
            lower.push(start);
            upper.push(start + side);
        }
        let window = Rectangle::from_min_max(lower, upper);
        let (_, visited) = tree.contained(&window)?;
        visit_sum += visited;
    }
    Ok(visit_sum as f64 / queries as f64)
}

/// Node splits observed while building a tree over `size` randomly drawn
/// records.
pub fn split_count(
    dataset: &Dataset,
    size: usize,
    max_entries: usize,
    min_entries: usize,
    rng: &mut StdRng,
) -> Result<u64> {
    ensure!(
        size <= dataset.len(),
        "--size {size} exceeds the {} dataset records",
        dataset.len()
    );

    let mut order: Vec<usize> = (0..dataset.len()).collect();
    order.shuffle(rng);
    order.truncate(size);
    let tree = build_tree(dataset, &order, max_entries, min_entries)?;
    Ok(tree.stats().splits)
}
