//! Normalized per-channel color histograms.

use image::RgbImage;

use crate::color::rgb_to_hsl;
use crate::errors::{FeatureError, FeatureResult};

fn check_bins(bins: usize) -> FeatureResult<()> {
    if !(1..=255).contains(&bins) {
        return Err(FeatureError::InvalidBinCount(bins));
    }
    Ok(())
}

fn normalize(histogram: &mut [f64], pixels: u64) {
    if pixels == 0 {
        return;
    }
    for bucket in histogram.iter_mut() {
        *bucket /= pixels as f64;
    }
}

/// RGB histogram with `bins` buckets per channel, concatenated as R, G, B.
///
/// Each bucket holds the fraction of pixels falling into it, so every
/// channel sums to 1 for a non-empty image. An empty image yields all
/// zeros. `bins` must be in `1..=255`.
pub fn rgb_histogram(image: &RgbImage, bins: usize) -> FeatureResult<Vec<f64>> {
    check_bins(bins)?;

    let mut histogram = vec![0.0; 3 * bins];
    for pixel in image.pixels() {
        for channel in 0..3 {
            let bucket = bins * pixel[channel] as usize / 256;
            histogram[channel * bins + bucket] += 1.0;
        }
    }
    normalize(&mut histogram, image.width() as u64 * image.height() as u64);
    Ok(histogram)
}

/// HSL histogram with `bins` buckets per channel, concatenated as H, S, L.
///
/// Hue buckets divide `[0, 360)` evenly; saturation and lightness buckets
/// divide `[0, 1]`, with the top of the range folded into the last bucket.
/// Normalization matches [`rgb_histogram`].
pub fn hsl_histogram(image: &RgbImage, bins: usize) -> FeatureResult<Vec<f64>> {
    check_bins(bins)?;

    let mut histogram = vec![0.0; 3 * bins];
    let scale = bins as f64;
    for pixel in image.pixels() {
        let (hue, saturation, lightness) = rgb_to_hsl(pixel);
        histogram[(scale * hue / 360.0) as usize] += 1.0;
        histogram[bins + (scale * saturation * 100.0 / 101.0) as usize] += 1.0;
        histogram[2 * bins + (scale * lightness * 100.0 / 101.0) as usize] += 1.0;
    }
    normalize(&mut histogram, image.width() as u64 * image.height() as u64);
    Ok(histogram)
}
