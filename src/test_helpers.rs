//! Shared test utilities for the thumbstrip test suite.
//!
//! Synthetic inputs are generated on the fly with the `image` encoders, so
//! no binary fixtures live in the repository.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let inputs = write_inputs(tmp.path(), &[("a.png", 600, 56), ("b.png", 28, 28)]);
//! ```

use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Synthetic images
// =========================================================================

/// Create a small valid JPEG file with a gradient pattern.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a solid-colour PNG. Lossless, so pixel values survive exactly.
pub fn create_test_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write one solid PNG per `(name, width, height)` into `dir`, returning the
/// paths in the same order. Colours differ per image so placement is visible.
pub fn write_inputs(dir: &Path, specs: &[(&str, u32, u32)]) -> Vec<PathBuf> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (name, width, height))| {
            let path = dir.join(name);
            create_test_png(&path, *width, *height, palette(i));
            path
        })
        .collect()
}

/// Distinct, fully saturated colour for the `i`th input.
pub fn palette(i: usize) -> [u8; 3] {
    const COLORS: [[u8; 3]; 4] = [[255, 0, 0], [0, 160, 0], [0, 0, 255], [0, 0, 0]];
    COLORS[i % COLORS.len()]
}
