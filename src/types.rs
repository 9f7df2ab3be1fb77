//! Geometry types shared by every stage of the strip pipeline.
//!
//! Both are plain `Copy` values in pixels with a top-left origin. They carry
//! no raster data, so the layout stage can be exercised without decoding a
//! single image.

use std::fmt;

/// Pixel extents of a raster.
///
/// Once an image has been loaded both fields are non-zero; the loader rejects
/// anything else before it can reach layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either extent is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Top-left placement of a thumbnail on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: u32,
    pub y: u32,
}

impl Offset {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}
