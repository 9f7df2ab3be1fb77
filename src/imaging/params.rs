//! Parameter types for raster operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline stages (which decide what to produce) and
//! the [`backend`](super::backend) (which does the pixel work), so a mock
//! engine can stand in for the real one without changing stage logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`Sharpening`]: Unsharp-mask parameters applied to every thumbnail.
//! - [`ResampleFilter`]: Resampling kernel for resizes.
//! - [`Background`]: Fill colour of a freshly allocated canvas.
//! - [`Destination`]: Where and in which format the canvas is encoded.

use image::ImageFormat;
use std::fmt;
use std::path::{Path, PathBuf};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    /// Quality the composed strip is always encoded with.
    pub const STRIP: Quality = Quality::new(70);

    pub const fn new(value: u32) -> Self {
        let value = if value < 1 {
            1
        } else if value > 100 {
            100
        } else {
            value
        };
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::STRIP
    }
}

/// Unsharp-mask parameters.
///
/// - `radius`: kernel radius in pixels (0 lets the engine derive it from sigma)
/// - `sigma`: standard deviation of the Gaussian blur
/// - `amount`: fraction of the difference added back
/// - `threshold`: minimum difference, as an 8-bit level (0-255), before a
///   pixel is sharpened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpening {
    pub radius: f32,
    pub sigma: f32,
    pub amount: f32,
    pub threshold: f32,
}

impl Sharpening {
    /// The fixed pass applied after downscaling every thumbnail.
    pub fn thumbnail() -> Self {
        Self {
            radius: 1.0,
            sigma: 0.5,
            amount: 1.0,
            threshold: 1.0,
        }
    }

    /// Threshold as an integer brightness level, which is what 8-bit kernels take.
    pub fn threshold_level(&self) -> i32 {
        self.threshold.round() as i32
    }
}

impl Default for Sharpening {
    fn default() -> Self {
        Self::thumbnail()
    }
}

/// Resampling kernel for resize operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResampleFilter {
    /// Windowed sinc; the only filter that keeps photographic thumbnails free
    /// of aliasing at strip scale factors.
    #[default]
    Lanczos3,
    CatmullRom,
    Triangle,
    Nearest,
}

/// Fill colour of a new canvas, as opaque RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background(pub [u8; 3]);

impl Background {
    pub const WHITE: Background = Background([255, 255, 255]);
}

impl Default for Background {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Where encoded output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

/// An output target: a sink plus an optional explicit format.
///
/// Parsed from strings of the form:
///
/// ```text
/// strip.jpg        format inferred from the extension
/// png:strip.bin    explicit format, file sink
/// pnm:-            explicit format, standard output
/// -                standard output, format must be given elsewhere
/// ```
///
/// Format prefixes shorter than two characters are treated as part of the
/// path so Windows drive letters (`C:\strip.png`) still parse as files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub format: Option<ImageFormat>,
    pub sink: Sink,
}

impl Destination {
    /// Default destination: binary PNM on standard output.
    pub fn pnm_stdout() -> Self {
        Self {
            format: Some(ImageFormat::Pnm),
            sink: Sink::Stdout,
        }
    }

    /// The explicit format, or the one implied by the file extension.
    pub fn resolved_format(&self) -> Option<ImageFormat> {
        self.format.or_else(|| match &self.sink {
            Sink::File(path) => ImageFormat::from_path(path).ok(),
            Sink::Stdout => None,
        })
    }

    pub fn parse(value: &str) -> Self {
        let (format, target) = match value.split_once(':') {
            Some((prefix, rest)) if prefix.len() >= 2 => {
                match ImageFormat::from_extension(prefix) {
                    Some(format) => (Some(format), rest),
                    None => (None, value),
                }
            }
            _ => (None, value),
        };
        let sink = if target == "-" {
            Sink::Stdout
        } else {
            Sink::File(PathBuf::from(target))
        };
        Self { format, sink }
    }

    /// File path of the sink, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File(path) => Some(path),
            Sink::Stdout => None,
        }
    }
}

impl Default for Destination {
    fn default() -> Self {
        Self::pnm_stdout()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(format) = self.format {
            write!(f, "{}:", format!("{format:?}").to_lowercase())?;
        }
        match &self.sink {
            Sink::Stdout => write!(f, "-"),
            Sink::File(path) => write!(f, "{}", path.display()),
        }
    }
}
