mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;

use app::StudentAppealApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

/// Explore student prerequisite appeals: PSAT scores against GPA.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Student data file to open on startup (.csv, .tsv, .json, .parquet)
    file: Option<PathBuf>,

    /// JSON configuration file overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let (config, config_error) = match &args.config {
        Some(path) => match DashboardConfig::load(path) {
            Ok(config) => (config, None),
            Err(e) => {
                log::error!("Falling back to default configuration: {e:#}");
                (DashboardConfig::default(), Some(format!("Error: {e:#}")))
            }
        },
        None => (DashboardConfig::default(), None),
    };

    let title = config.window_title.clone();
    let mut state = AppState::new(config);
    if let Some(path) = &args.file {
        state.open_path(path);
    }
    if let Some(message) = config_error {
        state.report_error(message);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(StudentAppealApp::new(state)))),
    )
}
