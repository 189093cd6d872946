use anyhow::{Context, Result};
use astroslide::app::{App, AppEvent};
use astroslide::config::Config;
use astroslide::logging;
use astroslide::ui;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(
    name = "astroslide",
    about = "Terminal slideshow for astrophotography catalogs"
)]
struct Args {
    /// Catalog location: a local JSON file or an http(s) URL
    #[arg(long, value_name = "PATH|URL")]
    catalog: Option<String>,

    /// Config file (default: ~/.config/astroslide/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Color theme: dark or light
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Append log output to this file (level from RUST_LOG, default info)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Read the config file, then let command-line flags win.
fn resolve_config(args: &Args) -> Result<Config> {
    let path = args.config.clone().or_else(Config::default_path);
    let mut config = match &path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => {
            tracing::warn!("HOME not set, using default configuration");
            Config::default()
        }
    };

    if let Some(catalog) = &args.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let config = resolve_config(&args)?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    let mut app = App::new(&config, event_tx).context("Failed to create application")?;

    app.load_catalog();
    ui::run(&mut app, event_rx).await?;

    Ok(())
}
