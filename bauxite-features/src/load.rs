//! Image file loading.

use std::fs;
use std::path::Path;

use image::RgbImage;

use crate::errors::FeatureResult;

/// Reads an image file and converts it to 8-bit RGB.
///
/// The format is sniffed from the file content, not the extension.
pub fn load_rgb(path: impl AsRef<Path>) -> FeatureResult<RgbImage> {
    let bytes = fs::read(path)?;
    Ok(image::load_from_memory(&bytes)?.to_rgb8())
}
