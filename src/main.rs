mod app;
mod state;
mod ui;

use aire_monitor::config::DashboardConfig;
use anyhow::Context;
use app::AireMonitorApp;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::discover()?;
    let state = AppState::new(config).context("preparing dashboard data")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Quality Monitoring – Mexico City",
        options,
        Box::new(|_cc| Ok(Box::new(AireMonitorApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
