use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::Source;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – data source and state picker
// ---------------------------------------------------------------------------

/// Render the left data panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data");
    ui.label("Upload a CSV with columns: state, county, income_2015, income_1989");
    if ui.button("Upload counties CSV…").clicked() {
        open_file_dialog(state);
    }
    ui.separator();

    match &state.source {
        Some(source) => {
            ui.label(RichText::new("Source").strong());
            ui.label(source.to_string());
            if !state.cache.is_empty() {
                ui.label(RichText::new(format!("{} source(s) cached", state.cache.len())).small());
            }
        }
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    }
    ui.add_space(8.0);

    if state.states.is_empty() {
        ui.colored_label(Color32::YELLOW, "No states found in the data.");
        return;
    }

    ui.strong("Choose a state");
    let current = state.selected_state.clone().unwrap_or_default();
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("state_picker")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for s in &state.states {
                if ui.selectable_label(current == *s, s).clicked() {
                    picked = Some(s.clone());
                }
            }
        });
    if let Some(s) = picked {
        state.select_state(s);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_reload = matches!(state.source, Some(Source::Path(_) | Source::Url(_)));
            if ui
                .add_enabled(can_reload, egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Clear cache").clicked() {
                state.cache.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        let edit = ui.add(
            egui::TextEdit::singleline(&mut state.url_input)
                .hint_text("https://…/counties.csv")
                .desired_width(280.0),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Fetch").clicked() || submitted {
            let url = state.url_input.trim().to_string();
            if !url.is_empty() {
                state.open_source(Source::Url(url), false);
            }
        }

        ui.separator();

        if let Some(records) = &state.records {
            ui.label(format!(
                "{} counties in {} states",
                records.len(),
                state.states.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open counties CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match read_upload(&path) {
            Ok(source) => state.open_source(source, false),
            Err(e) => {
                log::error!("Failed to read upload: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Picked files are treated as uploads: read once, never cached.
fn read_upload(path: &Path) -> Result<Source> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Source::Upload { name, bytes })
}
