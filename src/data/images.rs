//! Sign-image loading for the experiment runner.
//!
//! Expected layout: `<root>/<label>/<any image file>` with one folder per
//! class label `0..classes`. Each image becomes a grayscale intensity grid in
//! [0, 1], is block-averaged by the downsize factor and flattened row-major.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, warn};

use crate::data::example::Example;
use crate::error::{NetError, Result};
use crate::math::feature_map::{downsample, vector_from_matrix};
use crate::math::matrix::Matrix;

/// Mean of the red, green and blue channels, scaled to [0, 1].
pub fn intensity_grid(img: &DynamicImage) -> Matrix {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut grid = Matrix::zeros(height as usize, width as usize);
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let sum = r as f64 + g as f64 + b as f64;
        grid.data[y as usize][x as usize] = sum / (3.0 * 255.0);
    }
    grid
}

/// Grayscale, downsample, flatten.
pub fn image_to_features(img: &DynamicImage, downsize: usize) -> Result<Vec<f64>> {
    let grid = intensity_grid(img);
    Ok(vector_from_matrix(&downsample(&grid, downsize)?))
}

/// Loads every readable image under `root/0 .. root/{classes - 1}`.
///
/// Files inside a class folder are visited in path order so the result is
/// reproducible. Files that fail to decode are skipped with a warning.
pub fn load_sign_images(root: &Path, classes: usize, downsize: usize) -> Result<Vec<Example>> {
    let mut examples = Vec::new();

    for label in 0..classes {
        let folder = root.join(label.to_string());
        if !folder.is_dir() {
            return Err(NetError::dataset(format!(
                "missing class folder {}", folder.display()
            )));
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&folder)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let before = examples.len();
        for path in files {
            match image::open(&path) {
                Ok(img) => examples.push(Example::new(image_to_features(&img, downsize)?, label)),
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }
        debug!("class {}: {} images", label, examples.len() - before);
    }

    if let Some(first) = examples.first() {
        let width = first.len();
        if let Some(bad) = examples.iter().find(|e| e.len() != width) {
            return Err(NetError::dimension_mismatch(width, bad.len()));
        }
    }
    Ok(examples)
}
