use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::change_color;
use crate::data::export::{export_file_name, to_csv, EXPORT_HEADER};
use crate::data::format::{format_pct, format_usd, format_usd_opt};
use crate::data::model::TableRow;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).heading());
        });
    });
}

/// `# Counties`, recent median and baseline median for the selected state.
pub fn metrics(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "# Counties", view.count.to_string());
        metric(ui, "County Median (2015)", format_usd(view.median_recent));
        metric(ui, "County Median (1989)", format_usd(view.median_baseline));
    });
}

// ---------------------------------------------------------------------------
// County table
// ---------------------------------------------------------------------------

/// Sorted county table; the change column is coloured by direction.
pub fn county_table(ui: &mut Ui, state: &AppState) {
    let rows: &[TableRow] = &state.table;
    if rows.is_empty() {
        ui.label("No counties for this state.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto().at_least(120.0), 3)
        .header(22.0, |mut header| {
            for title in EXPORT_HEADER {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&r.county);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd_opt(r.income_baseline));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd_opt(r.income_recent));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(format_pct(r.pct_change)).color(change_color(r.pct_change)));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// CSV download
// ---------------------------------------------------------------------------

pub fn download_button(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        return;
    };
    if !ui.button("Download table as CSV…").clicked() {
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Save county table")
        .set_file_name(export_file_name(&view.state))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match write_export(&path, &state.table) {
            Ok(()) => {
                log::info!("Wrote {} rows to {}", state.table.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_export(path: &Path, rows: &[TableRow]) -> Result<()> {
    let text = to_csv(rows)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texas_county_incomes.csv");
        let rows = vec![TableRow {
            county: "Travis".into(),
            income_baseline: Some(25000.0),
            income_recent: Some(61000.0),
            pct_change: Some(144.0),
        }];
        write_export(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "County,Income Baseline (USD),Income Recent (USD),% Change\nTravis,25000,61000,144\n"
        );
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_export(&path, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("out.csv"));
    }
}
