//! Otsu binarization and grid density features.

use image::{GrayImage, Luma, RgbImage};
use log::debug;

use crate::color::luma;
use crate::errors::{FeatureError, FeatureResult};

/// Converts an image to 8-bit grayscale with the classic luma weights.
pub fn grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luma(image.get_pixel(x, y))])
    })
}

/// Otsu's threshold: the cut maximizing between-class variance over the
/// gray-level histogram.
///
/// Pixels strictly below the returned value count as the dark class.
/// Returns 0 for an empty or uniform image, so [`binarize`] then maps
/// everything to white.
pub fn otsu_threshold(image: &GrayImage) -> u8 {
    let mut counts = [0u64; 256];
    for pixel in image.pixels() {
        counts[pixel[0] as usize] += 1;
    }
    let total = image.width() as u64 * image.height() as u64;
    if total == 0 {
        return 0;
    }
    let overall_sum: f64 = counts
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0;
    let mut dark_count = 0u64;
    let mut dark_sum = 0.0;
    for threshold in 1..=255usize {
        dark_count += counts[threshold - 1];
        dark_sum += (threshold - 1) as f64 * counts[threshold - 1] as f64;

        let light_count = total - dark_count;
        if dark_count == 0 || light_count == 0 {
            continue;
        }
        let dark_weight = dark_count as f64 / total as f64;
        let light_weight = light_count as f64 / total as f64;
        let dark_mean = dark_sum / dark_count as f64;
        let light_mean = (overall_sum - dark_sum) / light_count as f64;
        let variance = dark_weight * light_weight * (dark_mean - light_mean).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = threshold as u8;
        }
    }
    best_threshold
}

/// Binarizes a grayscale image: pixels strictly below the threshold go
/// black (0), the rest white (255).
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if image.get_pixel(x, y)[0] < threshold {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Grid density feature over the Otsu-binarized image.
///
/// The image is cut into `cols * rows` cells of `width / cols` by
/// `height / rows` pixels; leftover pixels at the right and bottom edges
/// are ignored. The result holds the black-pixel ratio of each cell in
/// column-major order.
pub fn binary_grid(image: &RgbImage, cols: u32, rows: u32) -> FeatureResult<Vec<f64>> {
    if cols == 0 || rows == 0 || cols > image.width() || rows > image.height() {
        return Err(FeatureError::InvalidGrid {
            cols,
            rows,
            width: image.width(),
            height: image.height(),
        });
    }

    let grey = grayscale(image);
    let threshold = otsu_threshold(&grey);
    let binary = binarize(&grey, threshold);
    debug!("binarized {cols}x{rows} grid at threshold {threshold}");

    let cell_width = image.width() / cols;
    let cell_height = image.height() / rows;
    let cell_pixels = (cell_width as u64 * cell_height as u64) as f64;

    let mut feature = Vec::with_capacity((cols * rows) as usize);
    for i in 0..cols {
        for j in 0..rows {
            let mut dark = 0u64;
            for x in i * cell_width..(i + 1) * cell_width {
                for y in j * cell_height..(j + 1) * cell_height {
                    if binary.get_pixel(x, y)[0] == 0 {
                        dark += 1;
                    }
                }
            }
            feature.push(dark as f64 / cell_pixels);
        }
    }
    Ok(feature)
}
