//! Raster engine trait and shared error type.
//!
//! The [`RasterEngine`] trait is the full capability set the strip pipeline
//! needs from an image library: decode, resize, sharpen, allocate a canvas,
//! composite, and encode. Everything above this trait is pure orchestration
//! and geometry, so it can be tested against a mock engine.
//!
//! Raster handles are owned values of the associated [`RasterEngine::Raster`]
//! type. Releasing a handle is dropping it: `resize` and `sharpen` consume
//! their input, and a handle held by a record or a local binding is released
//! exactly once when that owner goes out of scope, on every exit path.
//!
//! The production implementation is
//! [`RustEngine`](super::rust_backend::RustEngine).

use super::params::{Background, Destination, Quality, ResampleFilter, Sharpening};
use crate::types::{Dimensions, Offset};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode: {0}")]
    Decode(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for raster engines.
///
/// `Sync` so one engine can serve a rayon pool; rasters are `Send` so loaded
/// thumbnails can move back to the collecting thread.
pub trait RasterEngine: Sync {
    type Raster: Send;

    /// Decode the image file at `path`.
    fn decode(&self, path: &Path) -> Result<Self::Raster, EngineError>;

    /// Extents of a raster.
    fn dimensions(&self, raster: &Self::Raster) -> Dimensions;

    /// Resample to exactly `size`, consuming the input raster.
    fn resize(
        &self,
        raster: Self::Raster,
        size: Dimensions,
        filter: ResampleFilter,
    ) -> Result<Self::Raster, EngineError>;

    /// Apply an unsharp mask, consuming the input raster.
    fn sharpen(
        &self,
        raster: Self::Raster,
        sharpening: &Sharpening,
    ) -> Result<Self::Raster, EngineError>;

    /// Allocate a blank, opaque canvas.
    fn new_canvas(
        &self,
        size: Dimensions,
        background: Background,
    ) -> Result<Self::Raster, EngineError>;

    /// Draw `source` onto `canvas` at `at` with source-over blending.
    fn composite(
        &self,
        canvas: &mut Self::Raster,
        source: &Self::Raster,
        at: Offset,
    ) -> Result<(), EngineError>;

    /// Encode `raster` to `destination`.
    fn encode(
        &self,
        raster: &Self::Raster,
        destination: &Destination,
        quality: Quality,
    ) -> Result<(), EngineError>;
}
