//! Canvas composition: paint every placed thumbnail onto one image.
//!
//! The canvas is allocated white, each thumbnail is composited source-over at
//! its offset in collection order, and the result is encoded at
//! [`Quality::STRIP`]. Placements never overlap, so the order has no visual
//! effect; it is kept fixed so runs are reproducible.
//!
//! The canvas is a local binding: it is released when this function returns,
//! whether encoding succeeded or not.

use crate::imaging::{Background, Destination, EngineError, Quality, RasterEngine};
use crate::layout::LayoutResult;
use crate::thumbnail::ThumbnailRecord;
use crate::types::Dimensions;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Could not allocate a {size} canvas: {source}")]
    Canvas {
        size: Dimensions,
        #[source]
        source: EngineError,
    },
    #[error("Could not composite {}: {source}", path.display())]
    Composite {
        path: PathBuf,
        #[source]
        source: EngineError,
    },
    #[error("{} has not been placed", path.display())]
    Unplaced { path: PathBuf },
    #[error("Could not write {destination}: {source}")]
    Encode {
        destination: String,
        #[source]
        source: EngineError,
    },
}

/// Composite `records` onto a fresh canvas and encode it to `destination`.
pub fn render_canvas<E: RasterEngine>(
    engine: &E,
    layout: &LayoutResult,
    records: &[ThumbnailRecord<E::Raster>],
    destination: &Destination,
) -> Result<(), RenderError> {
    let mut canvas = engine
        .new_canvas(layout.canvas_size, Background::WHITE)
        .map_err(|source| RenderError::Canvas {
            size: layout.canvas_size,
            source,
        })?;

    for record in records {
        let offset = record.offset().ok_or_else(|| RenderError::Unplaced {
            path: record.source_path.clone(),
        })?;
        engine
            .composite(&mut canvas, &record.raster, offset)
            .map_err(|source| RenderError::Composite {
                path: record.source_path.clone(),
                source,
            })?;
    }

    debug!("encoding {} canvas to {}", layout.canvas_size, destination);
    engine
        .encode(&canvas, destination, Quality::STRIP)
        .map_err(|source| RenderError::Encode {
            destination: destination.to_string(),
            source,
        })
}
