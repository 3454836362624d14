use eframe::egui;

use crate::error::RenderError;
use crate::render::figure::Figure;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LocationMapApp {
    figure: Figure,
    /// Uploaded once at start-up; freed when the window closes.
    backdrop: egui::TextureHandle,
}

impl LocationMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        let backdrop = cc.egui_ctx.load_texture(
            "map_backdrop",
            plot::backdrop_image(&figure.backdrop),
            egui::TextureOptions::LINEAR,
        );
        Self { figure, backdrop }
    }
}

impl eframe::App for LocationMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(&self.figure.title);
            });
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::location_plot(ui, &self.figure, self.backdrop.id());
        });
    }
}

/// Open a window showing `figure` and block until the operator closes it.
pub fn show(figure: Figure) -> Result<(), RenderError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title(figure.title.clone()),
        ..Default::default()
    };

    let app_name = figure.title.clone();
    log::debug!("Opening figure window with {} points", figure.points.len());
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(LocationMapApp::new(cc, figure)))),
    )
    .map_err(|e| RenderError::Display(e.to_string()))
}
