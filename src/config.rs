//! Strip configuration.
//!
//! Every knob has a default, so running with no configuration at all is the
//! common case. Values are layered:
//!
//! ```text
//! stock defaults  ←  --config file.toml  ←  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! row_height = 28        # Height of a row (and every thumbnail) in pixels
//! spacing = 4            # Gap between thumbnails and between rows
//! canvas_width = 732     # Width of a row, and of the output image
//! output = "pnm:-"       # [format:]path, "-" is standard output
//! # map_file = "strip.map"   # Coordinate map, omitted when unset
//!
//! [processing]
//! # max_processes = 4    # Parallel decode workers (omit for sequential)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Destination;
use crate::layout::StripGeometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("No input images given")]
    NoInputImages,
}

/// Strip configuration loaded from defaults, an optional file, and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    /// Height of every row in pixels. Thumbnails are scaled to exactly this.
    pub row_height: u32,
    /// Gap in pixels between neighbouring thumbnails and between rows.
    pub spacing: u32,
    /// Width of the canvas in pixels.
    pub canvas_width: u32,
    /// Output destination, `[format:]path` or `-` for standard output.
    pub output: String,
    /// Where to write the coordinate map; no map when unset.
    pub map_file: Option<PathBuf>,
    /// Decode parallelism.
    pub processing: ProcessingConfig,
}

pub const DEFAULT_ROW_HEIGHT: u32 = 28;
pub const DEFAULT_SPACING: u32 = 4;
pub const DEFAULT_CANVAS_WIDTH: u32 = 732;
pub const DEFAULT_OUTPUT: &str = "pnm:-";

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            spacing: DEFAULT_SPACING,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            output: DEFAULT_OUTPUT.to_string(),
            map_file: None,
            processing: ProcessingConfig::default(),
        }
    }
}

impl StripConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_height == 0 {
            return Err(ConfigError::Validation("row_height must be non-zero".into()));
        }
        if self.canvas_width == 0 {
            return Err(ConfigError::Validation(
                "canvas_width must be non-zero".into(),
            ));
        }
        if self.output.is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn geometry(&self) -> StripGeometry {
        StripGeometry {
            canvas_width: self.canvas_width,
            row_height: self.row_height,
            spacing: self.spacing,
        }
    }

    pub fn destination(&self) -> Destination {
        Destination::parse(&self.output)
    }

    /// Lay command-line values over this config. `None` keeps the current value.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(v) = overrides.row_height {
            self.row_height = v;
        }
        if let Some(v) = overrides.spacing {
            self.spacing = v;
        }
        if let Some(v) = overrides.canvas_width {
            self.canvas_width = v;
        }
        if let Some(v) = overrides.output {
            self.output = v;
        }
        if let Some(v) = overrides.map_file {
            self.map_file = Some(v);
        }
        if let Some(v) = overrides.max_processes {
            self.processing.max_processes = Some(v);
        }
        self
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub row_height: Option<u32>,
    pub spacing: Option<u32>,
    pub canvas_width: Option<u32>,
    pub output: Option<String>,
    pub map_file: Option<PathBuf>,
    pub max_processes: Option<usize>,
}

/// Parallel decode settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel decode workers.
    /// When absent, images are loaded one at a time.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective loader thread count from config.
///
/// - `None` → 1 (sequential)
/// - `Some(n)` → `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(1)
}

/// Parse a TOML config over the stock defaults.
pub fn parse_config(content: &str) -> Result<StripConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load config from `path`, or the stock defaults when `path` is `None`.
///
/// Validation is left to the caller so flags can still fix up file values.
pub fn load_config(path: Option<&Path>) -> Result<StripConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(StripConfig::default());
    };
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
