mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::RustyIrApp;
use eframe::egui;
use rusty_ir::config::ViewerConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from_env().unwrap_or_else(|e| {
        log::warn!("Ignoring config: {e:#}");
        ViewerConfig::default()
    });

    let mut state = AppState::from_config(&config);
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        ui::panels::open_path(&mut state, &path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty IR – Vibrational Spectrum Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(RustyIrApp::new(state)))),
    )
}
