use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{map_panel, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IncomeExplorerApp {
    pub state: AppState,
}

impl IncomeExplorerApp {
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_startup_source();
        Self { state }
    }
}

impl eframe::App for IncomeExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: data source + state picker ----
        egui::SidePanel::left("data_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map, then county explorer ----
        egui::CentralPanel::default().show(ctx, |ui| {
            map_panel::map_panel(ui, &self.state.map);
            ui.separator();

            ui.heading("County Income Explorer");
            if self.state.view.is_none() {
                ui.label(
                    "Upload a counties CSV in the side panel \
                     (or place counties.csv in the working directory).",
                );
                return;
            }
            table::metrics(ui, &self.state);
            table::download_button(ui, &mut self.state);
            ui.add_space(6.0);
            plot::income_bars(ui, &self.state);
            ui.add_space(6.0);
            table::county_table(ui, &self.state);
        });
    }
}
