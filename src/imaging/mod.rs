//! Raster operations in pure Rust, zero system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **Resize** | `imageops::resize` (Lanczos3) |
//! | **Sharpen** | `imageops::unsharpen` |
//! | **Composite** | `imageops::overlay` |
//! | **Encode** | JPEG / PNM / anything `image` can write |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing raster operations
//! - **Backend**: [`RasterEngine`] trait + [`RustEngine`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{EngineError, RasterEngine};
pub use calculations::{ScaleError, scale_to_row_height};
pub use params::{Background, Destination, Quality, ResampleFilter, Sharpening, Sink};
pub use rust_backend::RustEngine;
