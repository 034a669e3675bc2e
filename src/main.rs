mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = DashboardConfig::discover().unwrap_or_else(|e| {
        log::error!("{e}; falling back to default settings");
        DashboardConfig::default()
    });
    // `rusty-lot path/to/listings.csv` overrides the configured data file.
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = PathBuf::from(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Vehicle Listings Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config)))),
    )
}
