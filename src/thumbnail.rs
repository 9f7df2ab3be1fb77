//! Thumbnail loading: decode, scale to the row height, sharpen.
//!
//! Each input path becomes one [`ThumbnailRecord`] that owns its sharpened
//! raster. Records come back in input order, which is the placement order
//! for the rest of the pipeline; nothing downstream sorts them.
//!
//! ## Steps per image
//!
//! ```text
//! decode → size check → scale_to_row_height → resize (Lanczos3) → unsharp mask
//! ```
//!
//! Any failure aborts the whole load. There is no skip-and-continue: one bad
//! input fails the run. Rasters acquired before the failure are dropped on
//! the way out, including the partially processed one.
//!
//! ## Parallel loading
//!
//! [`load_thumbnails`] can fan work out over a local rayon pool. Results are
//! still collected in input order and the first failure *in input order* is
//! the one reported, so output never depends on scheduling.

use crate::imaging::{
    EngineError, RasterEngine, ResampleFilter, ScaleError, Sharpening, scale_to_row_height,
};
use crate::types::{Dimensions, Offset};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{}: {source}", path.display())]
    Engine {
        path: PathBuf,
        #[source]
        source: EngineError,
    },
    #[error("{}: image has zero height", path.display())]
    ZeroHeight { path: PathBuf },
    #[error("{}: {original} is too tall to scale to a {row_height}px row", path.display())]
    ZeroWidth {
        path: PathBuf,
        original: Dimensions,
        row_height: u32,
    },
    #[error("{}: {original} scaled to a {row_height}px row overflows", path.display())]
    TooWide {
        path: PathBuf,
        original: Dimensions,
        row_height: u32,
    },
    #[error("Could not start {threads} loader threads: {reason}")]
    ThreadPool { threads: usize, reason: String },
}

impl DecodeError {
    /// Input the error refers to, if it is about a single image.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Engine { path, .. }
            | Self::ZeroHeight { path }
            | Self::ZeroWidth { path, .. }
            | Self::TooWide { path, .. } => Some(path),
            Self::ThreadPool { .. } => None,
        }
    }
}

/// One input image through its life in the pipeline.
///
/// `source_path`, `original_size` and `thumbnail_size` are fixed at load
/// time. `offset` is written once by the row packer and read-only afterwards.
#[derive(Debug)]
pub struct ThumbnailRecord<R> {
    pub source_path: PathBuf,
    pub original_size: Dimensions,
    pub thumbnail_size: Dimensions,
    pub offset: Option<Offset>,
    pub raster: R,
}

impl<R> ThumbnailRecord<R> {
    /// Placement on the canvas. `None` until layout has run.
    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }
}

/// Load one image and turn it into a sharpened thumbnail `row_height` tall.
pub fn load_thumbnail<E: RasterEngine>(
    engine: &E,
    path: &Path,
    row_height: u32,
) -> Result<ThumbnailRecord<E::Raster>, DecodeError> {
    let engine_error = |source| DecodeError::Engine {
        path: path.to_path_buf(),
        source,
    };

    info!("reading {}", path.display());
    let raster = engine.decode(path).map_err(engine_error)?;
    let original_size = engine.dimensions(&raster);

    let thumbnail_size = scale_to_row_height(original_size, row_height).map_err(|e| match e {
        ScaleError::ZeroHeight => DecodeError::ZeroHeight {
            path: path.to_path_buf(),
        },
        ScaleError::ZeroWidth => DecodeError::ZeroWidth {
            path: path.to_path_buf(),
            original: original_size,
            row_height,
        },
        ScaleError::Overflow => DecodeError::TooWide {
            path: path.to_path_buf(),
            original: original_size,
            row_height,
        },
    })?;

    info!(
        "resizing {} from {} to {}",
        path.display(),
        original_size,
        thumbnail_size
    );
    let raster = engine
        .resize(raster, thumbnail_size, ResampleFilter::Lanczos3)
        .map_err(engine_error)?;
    let raster = engine
        .sharpen(raster, &Sharpening::thumbnail())
        .map_err(engine_error)?;

    Ok(ThumbnailRecord {
        source_path: path.to_path_buf(),
        original_size,
        thumbnail_size,
        offset: None,
        raster,
    })
}

/// Load every path in order.
///
/// With `threads <= 1` images are loaded one after another and loading stops
/// at the first failure. With more threads all images are loaded on a local
/// pool, then the first failure in input order is returned and every loaded
/// raster is dropped.
pub fn load_thumbnails<E: RasterEngine, P: AsRef<Path> + Sync>(
    engine: &E,
    paths: &[P],
    row_height: u32,
    threads: usize,
) -> Result<Vec<ThumbnailRecord<E::Raster>>, DecodeError> {
    if threads <= 1 || paths.len() <= 1 {
        return paths
            .iter()
            .map(|p| load_thumbnail(engine, p.as_ref(), row_height))
            .collect();
    }

    debug!("loading {} images on {} threads", paths.len(), threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| DecodeError::ThreadPool {
            threads,
            reason: e.to_string(),
        })?;
    let results: Vec<_> = pool.install(|| {
        paths
            .par_iter()
            .map(|p| load_thumbnail(engine, p.as_ref(), row_height))
            .collect()
    });
    results.into_iter().collect()
}
