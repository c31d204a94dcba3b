use eframe::egui::{self, Color32, RichText, Ui};

use crate::map::MapArtifact;

/// Summary of the pre-rendered map, or a placeholder when it is missing.
pub fn map_panel(ui: &mut Ui, map: &MapArtifact) {
    ui.heading("Interactive Map");
    match map {
        MapArtifact::Loaded { path, html } => {
            ui.label(RichText::new(format!("Loaded from: {}", path.display())).small());
            if let Some(title) = map.title() {
                ui.label(title);
            }
            ui.horizontal(|ui: &mut Ui| {
                ui.label(format!("{} KiB of HTML", html.len().div_ceil(1024)));
                if let Some(url) = map.file_url() {
                    if ui.button("Open in browser").clicked() {
                        ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                    }
                }
            });
        }
        MapArtifact::Missing { path } => {
            ui.colored_label(
                Color32::YELLOW,
                format!("Map file not found: {}", path.display()),
            );
        }
    }
}
