mod chart;
mod config;
mod data;
mod studio;

use std::path::Path;

use anyhow::Result;

use config::Config;
use studio::StudioClient;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;

    let dataset = data::loader::load_csv(Path::new(config::INPUT_PATH))?;
    log::info!(
        "Loaded {} rows, {} columns from {}",
        dataset.len(),
        dataset.width(),
        config::INPUT_PATH
    );

    let figure = chart::build_figure(&dataset, &config.title)?;
    log::info!(
        "Built figure '{}' with {} series",
        figure.title(),
        figure.series_count()
    );

    let client = StudioClient::new();
    let url = client.upload(&figure, &config.credentials).await?;
    log::info!("Chart published privately at {url}");

    Ok(())
}
