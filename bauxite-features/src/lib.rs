//! # Bauxite Features - Image Feature Vectors for Spatial Indexing
//!
//! This crate turns images into fixed-length `f64` feature vectors suitable
//! for indexing in the bauxite R-Tree, covering the classic content-based
//! retrieval descriptors.
//!
//! ## Features
//!
//! - **RGB Histograms**: Per-channel color distribution with a configurable
//!   bucket count
//! - **HSL Histograms**: Hue, saturation and lightness distribution for
//!   illumination-tolerant matching
//! - **Binary Grids**: Otsu-thresholded dark-pixel density over an even grid
//!   of cells
//! - **Building Blocks**: Grayscale conversion, Otsu thresholding and
//!   binarization exposed for reuse
//!
//! ## Quick Start
//!
//! ```rust
//! use bauxite_features::{binary_grid, rgb_histogram};
//! use image::{Rgb, RgbImage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = RgbImage::from_fn(32, 32, |x, _| {
//!     if x < 16 { Rgb([255, 0, 0]) } else { Rgb([255, 255, 255]) }
//! });
//!
//! // 8 buckets per channel, concatenated as R, G, B.
//! let color = rgb_histogram(&image, 8)?;
//! assert_eq!(color.len(), 24);
//!
//! // Dark-pixel ratio of each cell in a 4x4 grid, column-major.
//! let shape = binary_grid(&image, 4, 4)?;
//! assert_eq!(shape.len(), 16);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod binary;
pub mod color;
pub mod errors;
pub mod histogram;
pub mod load;

// Re-export error types
pub use errors::{FeatureError, FeatureResult};

// Re-export feature extractors
pub use binary::{binarize, binary_grid, grayscale, otsu_threshold};
pub use color::{luma, rgb_to_hsl};
pub use histogram::{hsl_histogram, rgb_histogram};
pub use load::load_rgb;
