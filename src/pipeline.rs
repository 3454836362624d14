use crate::config::PipelineConfig;
use crate::data::filter::filter_locations;
use crate::data::loader::load_table;
use crate::error::PipelineError;
use crate::render::{render, RenderedFigure};

/// Load → filter → render. The first failing stage ends the run; nothing
/// partial is passed on.
pub fn run(config: &PipelineConfig) -> Result<RenderedFigure, PipelineError> {
    let table = load_table(&config.locations, config.delimiter)?;
    log::info!(
        "Loaded {} locations from {}",
        table.len(),
        config.locations.display()
    );

    let filtered = filter_locations(&table, config.bounds)?;
    if filtered.is_empty() {
        log::warn!("No locations inside {}", config.bounds);
    } else {
        log::info!("{} locations inside {}", filtered.len(), config.bounds);
    }

    let figure = render(&filtered, &config.map_image, config.bounds, config.sink.clone())?;
    Ok(figure)
}
