//! Feature extraction over a directory of images.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use bauxite_features::{binary_grid, hsl_histogram, load_rgb, rgb_histogram};
use clap::ValueEnum;
use log::debug;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Method {
    /// Per-channel RGB histogram, `3 * bins` values.
    Rgb,
    /// Per-channel HSL histogram, `3 * bins` values.
    Hsl,
    /// Otsu-binarized dark-pixel grid, `cols * rows` values.
    Grid,
}

/// Path of the image list written alongside a feature file.
pub fn image_list_path(output: &Path) -> PathBuf {
    output.with_extension("images.txt")
}

/// Decodes every file in `images_dir` (sorted by name) and writes one
/// feature record per image to `output`, with the aligned image list next
/// to it.
pub fn extract(
    images_dir: &Path,
    output: &Path,
    method: Method,
    bins: usize,
    cols: u32,
    rows: u32,
) -> Result<()> {
    let mut paths: Vec<PathBuf> = fs::read_dir(images_dir)
        .with_context(|| format!("reading image directory {}", images_dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    paths.retain(|path| path.is_file());
    paths.sort();
    ensure!(
        !paths.is_empty(),
        "no files found in {}",
        images_dir.display()
    );

    let mut features = String::new();
    let mut names = String::new();
    for path in &paths {
        let image =
            load_rgb(path).with_context(|| format!("decoding {}", path.display()))?;
        let feature = match method {
            Method::Rgb => rgb_histogram(&image, bins)?,
            Method::Hsl => hsl_histogram(&image, bins)?,
            Method::Grid => binary_grid(&image, cols, rows)?,
        };
        let record: Vec<String> = feature.iter().map(f64::to_string).collect();
        features.push_str(&record.join(" "));
        features.push('\n');

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("non-UTF-8 file name {}", path.display()))?;
        names.push_str(name);
        names.push('\n');
        debug!("extracted {name}");
    }

    fs::write(output, features)
        .with_context(|| format!("writing feature file {}", output.display()))?;
    let list = image_list_path(output);
    fs::write(&list, names)
        .with_context(|| format!("writing image list {}", list.display()))?;
    Ok(())
}
