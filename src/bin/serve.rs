use std::sync::Arc;

use anyhow::Context;
use spacex_dash::config::DashboardConfig;
use spacex_dash::data::loader;
use spacex_dash::layout::DashboardLayout;
use spacex_dash::server;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env()?;
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading launch data from {}", config.data_path.display()))?;
    DashboardLayout::default().payload_slider.covers(&dataset);

    server::serve(config.bind_addr, Arc::new(dataset))
        .await
        .with_context(|| format!("serving on {}", config.bind_addr))
}
