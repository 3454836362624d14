use std::path::PathBuf;

use clap::Parser;

use crate::data::model::BoundingBox;
use crate::render::Sink;

pub const DEFAULT_LOCATIONS: &str = "GrowLocations.csv";
pub const DEFAULT_MAP: &str = "map7.png";

// Window covered by the map image.
pub const LAT_MIN: f64 = -10.592;
pub const LAT_MAX: f64 = 1.6848;
pub const LON_MIN: f64 = 50.681;
pub const LON_MAX: f64 = 57.985;

pub fn default_bounds() -> BoundingBox {
    BoundingBox::new(LAT_MIN, LAT_MAX, LON_MIN, LON_MAX)
}

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub locations: PathBuf,
    pub map_image: PathBuf,
    pub delimiter: u8,
    pub bounds: BoundingBox,
    pub sink: Sink,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            locations: PathBuf::from(DEFAULT_LOCATIONS),
            map_image: PathBuf::from(DEFAULT_MAP),
            delimiter: b',',
            bounds: default_bounds(),
            sink: Sink::Display,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Plot sensor locations over a map image")]
pub struct Cli {
    /// Delimited table with Latitude and Longitude columns
    #[arg(long, default_value = DEFAULT_LOCATIONS)]
    pub locations: PathBuf,

    /// Backdrop image stretched over the plotted window
    #[arg(long, default_value = DEFAULT_MAP)]
    pub map: PathBuf,

    /// Field delimiter of the locations file
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Write the figure to this PNG instead of opening a window
    #[arg(long, value_name = "PNG")]
    pub export: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            locations: self.locations,
            map_image: self.map,
            delimiter: self.delimiter,
            sink: self.export.map_or(Sink::Display, Sink::Export),
            ..PipelineConfig::default()
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("expected a single ASCII character, got '{s}'")),
    }
}
