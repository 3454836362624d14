use std::fmt::Display;
use std::path::Path;

use plotters::element::BitMapElement;
use plotters::prelude::*;

use crate::error::RenderError;

use super::figure::{Figure, MARKER_RADIUS, MARKER_RGB, X_LABEL, Y_LABEL};

/// Output size in pixels.
const CANVAS: (u32, u32) = (1024, 768);

/// Draw the figure into a PNG: backdrop stretched over the plotting area,
/// axes on top of it, markers last.
pub fn write_png(figure: &Figure, path: &Path) -> Result<(), RenderError> {
    let fail = |e: &dyn Display| RenderError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let bbox = figure.bbox;

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(bbox.lat_min..bbox.lat_max, bbox.lon_min..bbox.lon_max)
        .map_err(|e| fail(&e))?;

    let (width, height) = chart.plotting_area().dim_in_pixel();
    let backdrop: BitMapElement<(f64, f64)> = BitMapElement::with_owned_buffer(
        (bbox.lat_min, bbox.lon_max),
        (width, height),
        figure.backdrop.resized_rgb(width, height),
    )
    .ok_or_else(|| fail(&"backdrop does not match the plotting area"))?;
    chart
        .draw_series(std::iter::once(backdrop))
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()
        .map_err(|e| fail(&e))?;

    let (r, g, b) = MARKER_RGB;
    let marker = RGBColor(r, g, b).filled();
    chart
        .draw_series(
            figure
                .points
                .iter()
                .map(|&[lat, lon]| Circle::new((lat, lon), MARKER_RADIUS as i32, marker)),
        )
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    log::debug!("Wrote {}x{} figure to {}", CANVAS.0, CANVAS.1, path.display());
    Ok(())
}
