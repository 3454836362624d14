//! Rendering: compose the figure, then hand it to a sink.
//!
//! ```text
//!  filtered LocationTable + map image
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  figure   │  points + decoded backdrop → Figure
//!   └──────────┘
//!        │
//!        ├── Sink::Display → eframe window (app)
//!        └── Sink::Export  → PNG (export)
//! ```

use std::path::{Path, PathBuf};

use crate::data::model::{BoundingBox, LocationTable};
use crate::error::RenderError;

pub mod export;
pub mod figure;

use figure::Figure;

/// Where a finished figure goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Open a window and block until it is closed.
    Display,
    /// Write a PNG to the given path.
    Export(PathBuf),
}

/// Summary of a figure that reached its sink.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFigure {
    pub title: String,
    pub point_count: usize,
    pub sink: Sink,
}

/// Scatter `filtered` over the image at `image_path`, stretched to `bbox`.
///
/// The sink is only touched once the backdrop has loaded, so a missing or
/// broken image never opens a window or creates an output file.
pub fn render(
    filtered: &LocationTable,
    image_path: &Path,
    bbox: BoundingBox,
    sink: Sink,
) -> Result<RenderedFigure, RenderError> {
    let figure = Figure::compose(filtered, image_path, bbox)?;
    let title = figure.title.clone();
    let point_count = figure.points.len();

    match &sink {
        Sink::Display => crate::app::show(figure)?,
        Sink::Export(path) => export::write_png(&figure, path)?,
    }

    Ok(RenderedFigure {
        title,
        point_count,
        sink,
    })
}
