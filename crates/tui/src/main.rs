mod app;
mod graphic;

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use rechtsform_core::{
    catalog,
    config::{self, AppConfig},
};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config_path = config::ensure_default_config()?;
    let config = match AppConfig::load_from(&config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!(?err, "Unreadable configuration; using defaults");
            AppConfig::default()
        }
    };

    let catalog = catalog();
    info!(
        sections = catalog.sections().len(),
        alternates = catalog.alternates().len(),
        "Catalog loaded"
    );

    let mut app = app::RechtsformApp::new(catalog, config, config_path)?;
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("rechtsform.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::from_default_env();

    // The terminal belongs to the UI, so events only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
