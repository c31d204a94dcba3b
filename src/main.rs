mod app;
mod color;
mod config;
mod data;
mod map;
mod state;
mod ui;

use anyhow::Context;
use app::IncomeExplorerApp;
use config::AppConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load().context("loading configuration")?;
    log::debug!("Configuration: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "State Income Map through the US",
        options,
        Box::new(|_cc| Ok(Box::new(IncomeExplorerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
