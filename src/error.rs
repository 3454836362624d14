use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::BoundingBox;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found - {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Problem parsing the file - {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid latitude or longitude bounds ({0})")]
    InvalidBounds(BoundingBox),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Map image file not found - {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("Failed to decode map image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot place the map image in invalid bounds ({0})")]
    InvalidBounds(BoundingBox),

    #[error("Failed to open the figure window: {0}")]
    Display(String),

    #[error("Failed to export the figure to {}: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

/// Any stage failure, tagged by the stage that reported it.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
