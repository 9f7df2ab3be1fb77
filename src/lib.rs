//! # Thumbstrip
//!
//! Packs a list of images into one contact-sheet strip: every image is scaled
//! to a fixed row height, laid left to right with a fixed gutter, wrapped onto
//! a new row when it would overflow the canvas width, and the whole canvas is
//! written as a single image. An optional map file records where each
//! thumbnail landed so a page can turn the strip into clickable regions.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      paths      →  thumbnails   (decode, scale to row height, sharpen)
//! 2. Lay out   thumbnails →  offsets      (greedy row packing, input order)
//! 3. Render    offsets    →  strip image  (white canvas, composite, encode)
//! 4. Map       offsets    →  map file     (name, x0, y0, x1, y1 per line)
//! ```
//!
//! Any failure aborts the run; there is no partial strip.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Orchestrates the four stages and tracks which one is running |
//! | [`thumbnail`] | Stage 1: decode + scale + sharpen, sequential or on a local rayon pool |
//! | [`layout`] | Stage 2: pure row-packing arithmetic |
//! | [`compose`] | Stage 3: canvas allocation, compositing, encoding |
//! | [`mapfile`] | Stage 4: tab-separated coordinate map |
//! | [`config`] | Defaults, optional `strip.toml`, command-line overrides |
//! | [`imaging`] | The [`imaging::RasterEngine`] seam and its `image`-crate implementation |
//! | [`types`] | `Dimensions` and `Offset` |
//! | [`logger`] | `tracing` subscriber on stderr |
//!
//! # Design Decisions
//!
//! ## Rasters Are Owned Values
//!
//! A thumbnail's pixels live in its [`thumbnail::ThumbnailRecord`]; resizing
//! and sharpening consume the previous raster and return the next one. Release
//! is `Drop`, so an early return anywhere in the pipeline frees everything
//! that was loaded so far without bookkeeping.
//!
//! ## Engine Behind a Trait
//!
//! All pixel work goes through [`imaging::RasterEngine`]. The production
//! engine is pure Rust on the `image` crate; tests swap in a recording mock so
//! layout, ordering and cleanup are checked without encoding a single file.

pub mod compose;
pub mod config;
pub mod imaging;
pub mod layout;
pub mod logger;
pub mod mapfile;
pub mod pipeline;
pub mod thumbnail;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
