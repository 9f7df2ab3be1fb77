//! Pure Rust raster engine built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP, PNM) | `image::ImageReader` with content sniffing |
//! | Resize | `image::imageops::resize` (`Lanczos3` by default) |
//! | Sharpen | `image::imageops::unsharpen` |
//! | Canvas | `image::RgbaImage::from_pixel` |
//! | Composite | `image::imageops::overlay` (source-over) |
//! | Encode | `JpegEncoder` with quality, binary `PnmEncoder`, `write_to` otherwise |
//!
//! Rasters are `RgbaImage`s. The `image` unsharp kernel derives its radius
//! from sigma and always adds the full difference back, so of the
//! [`Sharpening`] parameters only sigma and threshold reach it.

use super::backend::{EngineError, RasterEngine};
use super::params::{Background, Destination, Quality, ResampleFilter, Sharpening, Sink};
use crate::types::{Dimensions, Offset};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::imageops::{self, FilterType};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, Limits, Rgba, RgbaImage,
};
use std::io::{Cursor, Write};
use std::path::Path;

/// Pure Rust engine using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustEngine;

impl RustEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Triangle => FilterType::Triangle,
        ResampleFilter::Nearest => FilterType::Nearest,
    }
}

/// Refuse a buffer of `size` pixels at `bytes_per_pixel` that would exceed
/// the `image` crate's default allocation limit.
fn check_alloc(size: Dimensions, bytes_per_pixel: u64, what: &str) -> Result<(), EngineError> {
    let limit = Limits::default().max_alloc.unwrap_or(u64::MAX);
    let bytes = u64::from(size.width)
        .checked_mul(u64::from(size.height))
        .and_then(|pixels| pixels.checked_mul(bytes_per_pixel));
    match bytes {
        Some(bytes) if bytes <= limit => Ok(()),
        _ => Err(EngineError::ProcessingFailed(format!(
            "{what} of {size} exceeds the {limit} byte allocation limit"
        ))),
    }
}

/// Encode an RGB flattening of `raster` into an in-memory buffer.
///
/// Buffering first lets every format go to stdout, which is not seekable.
fn encode_to_vec(
    raster: &RgbaImage,
    format: ImageFormat,
    quality: Quality,
) -> Result<Vec<u8>, EngineError> {
    let rgb = DynamicImage::ImageRgba8(raster.clone()).to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut buffer = Vec::new();

    let result = match format {
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, quality.value() as u8)
            .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8),
        ImageFormat::Pnm => PnmEncoder::new(&mut buffer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8),
        other => DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut buffer), other),
    };
    result.map_err(|e| EngineError::ProcessingFailed(format!("{format:?} encode failed: {e}")))?;
    Ok(buffer)
}

impl RasterEngine for RustEngine {
    type Raster = RgbaImage;

    fn decode(&self, path: &Path) -> Result<RgbaImage, EngineError> {
        let image = ImageReader::open(path)
            .map_err(|e| EngineError::Decode(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| EngineError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| EngineError::Decode(e.to_string()))?;
        Ok(image.to_rgba8())
    }

    fn dimensions(&self, raster: &RgbaImage) -> Dimensions {
        let (width, height) = raster.dimensions();
        Dimensions { width, height }
    }

    fn resize(
        &self,
        raster: RgbaImage,
        size: Dimensions,
        filter: ResampleFilter,
    ) -> Result<RgbaImage, EngineError> {
        if size.is_empty() {
            return Err(EngineError::ProcessingFailed(format!(
                "Cannot resize to {size}"
            )));
        }
        // The vertical pass goes through an RGBA f32 buffer of source width.
        check_alloc(Dimensions::new(raster.width(), size.height), 16, "resize buffer")?;
        check_alloc(size, 4, "resized raster")?;
        Ok(imageops::resize(
            &raster,
            size.width,
            size.height,
            filter_type(filter),
        ))
    }

    fn sharpen(
        &self,
        raster: RgbaImage,
        sharpening: &Sharpening,
    ) -> Result<RgbaImage, EngineError> {
        Ok(imageops::unsharpen(
            &raster,
            sharpening.sigma,
            sharpening.threshold_level(),
        ))
    }

    fn new_canvas(
        &self,
        size: Dimensions,
        background: Background,
    ) -> Result<RgbaImage, EngineError> {
        if size.is_empty() {
            return Err(EngineError::ProcessingFailed(format!(
                "Cannot allocate a {size} canvas"
            )));
        }
        check_alloc(size, 4, "canvas")?;
        let [r, g, b] = background.0;
        Ok(RgbaImage::from_pixel(
            size.width,
            size.height,
            Rgba([r, g, b, 255]),
        ))
    }

    fn composite(
        &self,
        canvas: &mut RgbaImage,
        source: &RgbaImage,
        at: Offset,
    ) -> Result<(), EngineError> {
        let (canvas_w, canvas_h) = canvas.dimensions();
        let (src_w, src_h) = source.dimensions();
        let fits = u64::from(at.x) + u64::from(src_w) <= u64::from(canvas_w)
            && u64::from(at.y) + u64::from(src_h) <= u64::from(canvas_h);
        if !fits {
            return Err(EngineError::ProcessingFailed(format!(
                "{src_w}x{src_h} raster at ({}, {}) falls outside the {canvas_w}x{canvas_h} canvas",
                at.x, at.y
            )));
        }
        imageops::overlay(canvas, source, i64::from(at.x), i64::from(at.y));
        Ok(())
    }

    fn encode(
        &self,
        raster: &RgbaImage,
        destination: &Destination,
        quality: Quality,
    ) -> Result<(), EngineError> {
        let format = destination
            .resolved_format()
            .ok_or_else(|| EngineError::UnsupportedFormat(destination.to_string()))?;
        if !format.writing_enabled() {
            return Err(EngineError::UnsupportedFormat(format!("{format:?}")));
        }
        let bytes = encode_to_vec(raster, format, quality)?;

        match &destination.sink {
            Sink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
            Sink::File(path) => std::fs::write(path, &bytes)?,
        }
        Ok(())
    }
}
