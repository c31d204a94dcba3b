use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::generate_palette;
use crate::data::format::format_usd;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Income bar chart (central panel)
// ---------------------------------------------------------------------------

const BAR_WIDTH: f64 = 0.4;

/// Recent and baseline income per county, in table order. Counties with a
/// missing income simply have no bar for that series.
pub fn income_bars(ui: &mut Ui, state: &AppState) {
    if state.table.is_empty() {
        return;
    }

    let palette = generate_palette(2);
    let (recent_color, baseline_color) = (palette[0], palette[1]);

    let mut recent = Vec::new();
    let mut baseline = Vec::new();
    for (i, row) in state.table.iter().enumerate() {
        let x = i as f64;
        if let Some(v) = row.income_recent {
            recent.push(
                Bar::new(x - BAR_WIDTH / 2.0, v)
                    .width(BAR_WIDTH)
                    .name(format!("{} 2015: {}", row.county, format_usd(v))),
            );
        }
        if let Some(v) = row.income_baseline {
            baseline.push(
                Bar::new(x + BAR_WIDTH / 2.0, v)
                    .width(BAR_WIDTH)
                    .name(format!("{} 1989: {}", row.county, format_usd(v))),
            );
        }
    }

    Plot::new("income_bars")
        .height(220.0)
        .legend(Legend::default())
        .y_axis_label("Income (USD)")
        .include_y(0.0)
        .allow_scroll(false)
        .show_axes([false, true])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(recent).name("Income 2015").color(recent_color));
            plot_ui.bar_chart(BarChart::new(baseline).name("Income 1989").color(baseline_color));
        });
}
