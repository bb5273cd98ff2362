mod app;
mod color;
mod config;
mod content;
mod data;
mod error;
mod headless;
mod playground;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::PortfolioApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    let bin_count = usize::from(config.bins);

    match &config.command {
        Some(command) => headless::run(command, &config.data, bin_count, &mut std::io::stdout().lock()),
        None => run_gui(config.data, bin_count),
    }
}

fn run_gui(data: PathBuf, bin_count: usize) -> Result<()> {
    // The dataset is read once here and handed to the app; File → Open is
    // the only other place that replaces it.
    let mut state = AppState::new(bin_count);
    state.open(&data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio – Data Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(PortfolioApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the window: {e}"))
}
