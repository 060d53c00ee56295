//! Feature-file and image-list loading.
//!
//! A feature file holds one record per line, `dimension` whitespace-separated
//! `f64` literals each. The image list is position-aligned with it, one image
//! name per line; the category of an image is the prefix of its name before
//! the first `_`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bauxite::Point;

/// A feature file and its aligned image list, loaded and validated.
pub struct Dataset {
    pub points: Vec<Point>,
    pub names: Vec<String>,
}

impl Dataset {
    pub fn load(features: &Path, images: &Path, dimension: usize) -> Result<Dataset> {
        let points = load_features(features, dimension)?;
        let names = load_image_list(images)?;
        if points.len() != names.len() {
            bail!(
                "{} holds {} records but {} holds {} names",
                features.display(),
                points.len(),
                images.display(),
                names.len()
            );
        }
        Ok(Dataset { points, names })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Category label of an image name: everything before the first `_`.
pub fn category(name: &str) -> &str {
    match name.find('_') {
        Some(index) => &name[..index],
        None => name,
    }
}

pub fn load_features(path: &Path, dimension: usize) -> Result<Vec<Point>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading feature file {}", path.display()))?;

    let mut points = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let mut values = Vec::with_capacity(dimension);
        for token in line.split_whitespace() {
            let value: f64 = token.parse().with_context(|| {
                format!("{}:{}: bad feature value {token:?}", path.display(), number + 1)
            })?;
            values.push(value);
        }
        if values.len() != dimension {
            bail!(
                "{}:{}: expected {} values, found {}",
                path.display(),
                number + 1,
                dimension,
                values.len()
            );
        }
        points.push(Point::new(values));
    }
    Ok(points)
}

pub fn load_image_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading image list {}", path.display()))?;
    Ok(text.lines().map(str::to_owned).collect())
}
