use eframe::egui::{self, Color32, ColorImage, TextureId, Ui};
use egui_plot::{Plot, PlotImage, PlotPoint, PlotPoints, Points};

use crate::render::figure::{Figure, MapImage, MARKER_RADIUS, MARKER_RGB, X_LABEL, Y_LABEL};

// ---------------------------------------------------------------------------
// Location plot (central panel)
// ---------------------------------------------------------------------------

/// Render the backdrop and the scatter in the central panel.
///
/// The backdrop is added first so the markers are painted over it. No data
/// aspect is set, so the image fills the box whatever its own proportions.
pub fn location_plot(ui: &mut Ui, figure: &Figure, backdrop: TextureId) {
    let bbox = figure.bbox;
    let [center_x, center_y] = figure.backdrop_center();
    let [width, height] = figure.backdrop_size();
    let (r, g, b) = MARKER_RGB;

    Plot::new("location_plot")
        .x_axis_label(X_LABEL)
        .y_axis_label(Y_LABEL)
        .include_x(bbox.lat_min)
        .include_x(bbox.lat_max)
        .include_y(bbox.lon_min)
        .include_y(bbox.lon_max)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                backdrop,
                PlotPoint::new(center_x, center_y),
                egui::vec2(width as f32, height as f32),
            ));

            let points: PlotPoints = figure.points.iter().copied().collect();
            plot_ui.points(
                Points::new(points)
                    .color(Color32::from_rgb(r, g, b))
                    .radius(MARKER_RADIUS)
                    .name("Sensors"),
            );
        });
}

/// Convert the decoded backdrop into an egui image for texture upload.
pub fn backdrop_image(map: &MapImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([map.width() as usize, map.height() as usize], map.rgba())
}
