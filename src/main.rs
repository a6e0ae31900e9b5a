mod app;
mod chart;
mod color;
mod config;
mod controller;
mod data;
mod error;
mod export;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::DashboardApp;
use clap::Parser;
use config::Cli;
use controller::{Controller, DashboardContext};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let slider = cli.slider()?;

    let dataset = data::loader::load_file(&cli.data).inspect_err(|e| {
        log::error!("Failed to load launch records: {e:#}");
    })?;
    match dataset.payload_bounds {
        Some((min, max)) => log::info!("Observed payloads span {min}..={max} kg"),
        None => log::warn!("{} contains no launches; charts will be empty", cli.data.display()),
    }
    let context = DashboardContext::new(dataset, slider);
    let initial = cli.initial_inputs(&context);

    if let Some(dir) = &cli.export {
        let controller = Controller::new(&context, initial);
        let written = export::export_regions(&controller, dir)
            .with_context(|| format!("exporting charts to {}", dir.display()))?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 950.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(context, initial);
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
