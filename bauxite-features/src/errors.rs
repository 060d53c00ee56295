//! Error types for feature extraction.

use thiserror::Error;

/// Errors produced while decoding images or extracting feature vectors.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing an image file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Histogram bin count outside the supported range.
    #[error("Bin count must be between 1 and 255, got {0}")]
    InvalidBinCount(usize),

    /// Grid has zero-sized cells for the given image.
    #[error("Grid of {cols}x{rows} cells does not fit a {width}x{height} image")]
    InvalidGrid {
        cols: u32,
        rows: u32,
        width: u32,
        height: u32,
    },
}

/// Result alias for feature extraction operations.
pub type FeatureResult<T> = Result<T, FeatureError>;
