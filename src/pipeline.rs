//! The strip pipeline: load → lay out → render → map.
//!
//! [`Pipeline`] walks a fixed sequence of stages and records where it is:
//!
//! ```text
//! Idle → Loading → LayingOut → Rendering → Mapping → Done
//!           │          │           │          │
//!           └──────────┴─────┬─────┴──────────┘
//!                            ▼
//!                          Failed
//! ```
//!
//! Every error is terminal; nothing is retried and no input is skipped.
//!
//! ## Resource lifetime
//!
//! The thumbnail collection is a local of [`Pipeline::run`] and the canvas a
//! local of [`render_canvas`]. Whatever stage fails, unwinding the `?` drops
//! both, so every raster is released exactly once before `run` returns.

use crate::compose::{RenderError, render_canvas};
use crate::config::{ConfigError, StripConfig, effective_threads};
use crate::imaging::{RasterEngine, RustEngine};
use crate::layout::{LayoutError, pack_rows};
use crate::mapfile::{MapWriteError, write_map};
use crate::thumbnail::{DecodeError, load_thumbnails};
use crate::types::Dimensions;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum StripError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    MapWrite(#[from] MapWriteError),
}

/// Where a pipeline run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loading,
    LayingOut,
    Rendering,
    Mapping,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Loading => "loading",
            Stage::LayingOut => "laying out",
            Stage::Rendering => "rendering",
            Stage::Mapping => "mapping",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripSummary {
    pub thumbnails: usize,
    pub row_count: u32,
    pub canvas_size: Dimensions,
}

/// Sequential orchestrator over a [`RasterEngine`].
pub struct Pipeline<'e, E: RasterEngine> {
    engine: &'e E,
    config: StripConfig,
    stage: Stage,
    failed_in: Option<Stage>,
}

impl<'e, E: RasterEngine> Pipeline<'e, E> {
    pub fn new(engine: &'e E, config: StripConfig) -> Self {
        Self {
            engine,
            config,
            stage: Stage::Idle,
            failed_in: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The stage that was running when the pipeline entered [`Stage::Failed`].
    pub fn failed_in(&self) -> Option<Stage> {
        self.failed_in
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    fn enter(&mut self, stage: Stage) {
        debug!("stage: {} → {}", self.stage, stage);
        self.stage = stage;
    }

    /// Build the strip for `inputs`, in order.
    pub fn run<P: AsRef<Path> + Sync>(&mut self, inputs: &[P]) -> Result<StripSummary, StripError> {
        self.failed_in = None;
        let result = self.execute(inputs);
        if result.is_err() {
            warn!("aborted while {}", self.stage);
            self.failed_in = Some(self.stage);
            self.enter(Stage::Failed);
        }
        result
    }

    fn execute<P: AsRef<Path> + Sync>(&mut self, inputs: &[P]) -> Result<StripSummary, StripError> {
        self.enter(Stage::Loading);
        self.config.validate()?;
        let threads = effective_threads(&self.config.processing);
        let mut records = load_thumbnails(self.engine, inputs, self.config.row_height, threads)?;
        if records.is_empty() {
            return Err(ConfigError::NoInputImages.into());
        }

        self.enter(Stage::LayingOut);
        let layout = pack_rows(&mut records, &self.config.geometry())?;

        self.enter(Stage::Rendering);
        let destination = self.config.destination();
        render_canvas(self.engine, &layout, &records, &destination)?;

        self.enter(Stage::Mapping);
        write_map(self.config.map_file.as_deref(), &records)?;

        self.enter(Stage::Done);
        info!(
            "{} thumbnails in {} rows → {} canvas",
            records.len(),
            layout.row_count,
            layout.canvas_size
        );
        Ok(StripSummary {
            thumbnails: records.len(),
            row_count: layout.row_count,
            canvas_size: layout.canvas_size,
        })
    }
}

/// Run the full pipeline with the pure Rust engine.
pub fn run(config: StripConfig, inputs: &[impl AsRef<Path> + Sync]) -> Result<StripSummary, StripError> {
    let engine = RustEngine::new();
    Pipeline::new(&engine, config).run(inputs)
}
