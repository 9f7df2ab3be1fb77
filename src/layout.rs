//! Row packing: place thumbnails left to right into fixed-height rows.
//!
//! A single greedy pass in input order. The cursor starts at the top-left;
//! each thumbnail goes at the cursor if it fits in what is left of the row,
//! otherwise the cursor wraps to the start of the next row first. A thumbnail
//! that does not fit even in an empty row makes the canvas width infeasible
//! and fails the whole layout.
//!
//! ```text
//! W = 700, S = 4, three 300px thumbnails:
//!
//! ┌──────────────────────────────────────┐
//! │[  1: x=0  ]    [ 2: x=304 ]          │  row 0, y = 0
//! │                                      │  gutter S
//! │[  3: x=0  ]                          │  row 1, y = H + S
//! └──────────────────────────────────────┘
//! ```
//!
//! Nothing is reordered, rotated or balanced: reading the strip left to
//! right, top to bottom gives back the input order.
//!
//! The cursor lives on the stack of [`compute_offsets`], so packing is a pure
//! function of its inputs and safe to call repeatedly.

use crate::thumbnail::ThumbnailRecord;
use crate::types::{Dimensions, Offset};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Image too large: {} is {width}px wide but rows are {canvas_width}px", path.display())]
    ImageTooWide {
        path: PathBuf,
        width: u32,
        canvas_width: u32,
    },
    #[error("{rows} rows of {row_height}px do not fit in a single image")]
    CanvasTooTall { rows: u32, row_height: u32 },
}

/// Canvas width, row height and gutter, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripGeometry {
    pub canvas_width: u32,
    pub row_height: u32,
    pub spacing: u32,
}

impl StripGeometry {
    /// Height of a canvas holding `rows` rows: `rows * H + (rows - 1) * S`.
    pub fn canvas_height(&self, rows: u32) -> Option<u32> {
        let rows = u64::from(rows.max(1));
        let height = rows
            .checked_mul(u64::from(self.row_height))?
            .checked_add((rows - 1).checked_mul(u64::from(self.spacing))?)?;
        u32::try_from(height).ok()
    }
}

/// Outcome of a successful packing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutResult {
    pub row_count: u32,
    pub canvas_size: Dimensions,
}

/// Pack thumbnails given as `(path, width)` pairs, in order.
///
/// Returns one offset per item plus the row count and canvas size. The path
/// is only used to name the culprit in [`LayoutError::ImageTooWide`].
pub fn compute_offsets<'a, I>(
    items: I,
    geometry: &StripGeometry,
) -> Result<(Vec<Offset>, LayoutResult), LayoutError>
where
    I: IntoIterator<Item = (&'a Path, u32)>,
{
    let row_advance = u64::from(geometry.row_height) + u64::from(geometry.spacing);
    let canvas_width = u64::from(geometry.canvas_width);

    let mut col: u64 = 0;
    let mut row: u64 = 0;
    let mut row_count: u32 = 1;
    let mut offsets = Vec::new();

    for (path, width) in items {
        let width64 = u64::from(width);
        while col + width64 > canvas_width {
            if col == 0 {
                return Err(LayoutError::ImageTooWide {
                    path: path.to_path_buf(),
                    width,
                    canvas_width: geometry.canvas_width,
                });
            }
            row_count = row_count
                .checked_add(1)
                .ok_or(LayoutError::CanvasTooTall {
                    rows: row_count,
                    row_height: geometry.row_height,
                })?;
            col = 0;
            row += row_advance;
        }
        let y = u32::try_from(row).map_err(|_| LayoutError::CanvasTooTall {
            rows: row_count,
            row_height: geometry.row_height,
        })?;
        // col + width <= canvas_width, so col fits in u32.
        let offset = Offset::new(col as u32, y);
        debug!("placing {} at ({}, {})", path.display(), offset.x, offset.y);
        offsets.push(offset);
        col += width64 + u64::from(geometry.spacing);
    }

    let height = geometry
        .canvas_height(row_count)
        .ok_or(LayoutError::CanvasTooTall {
            rows: row_count,
            row_height: geometry.row_height,
        })?;
    let result = LayoutResult {
        row_count,
        canvas_size: Dimensions::new(geometry.canvas_width, height),
    };
    Ok((offsets, result))
}

/// Assign every record's offset in collection order.
///
/// On failure no record is touched.
pub fn pack_rows<R>(
    records: &mut [ThumbnailRecord<R>],
    geometry: &StripGeometry,
) -> Result<LayoutResult, LayoutError> {
    let (offsets, result) = compute_offsets(
        records
            .iter()
            .map(|r| (r.source_path.as_path(), r.thumbnail_size.width)),
        geometry,
    )?;
    for (record, offset) in records.iter_mut().zip(offsets) {
        record.offset = Some(offset);
    }
    debug!(
        "{} thumbnails in {} rows, canvas {}",
        records.len(),
        result.row_count,
        result.canvas_size
    );
    Ok(result)
}
