mod app;
mod color;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::DashboardApp;
use eframe::egui;
use spacex_dash::config::DashboardConfig;
use spacex_dash::data::loader;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env()?;
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading launch data from {}", config.data_path.display()))?;
    let dataset = Arc::new(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
