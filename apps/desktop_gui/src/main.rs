//! Desktop product catalog client: startup wiring and the eframe entry point.

mod backend_bridge;
mod config;
mod controller;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use url::Url;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::{self, BridgeConfig};
use controller::events::UiEvent;
use ui::CatalogApp;

#[derive(Debug, Parser)]
#[command(name = "catalog_gui", about = "Desktop client for a product catalog backend")]
struct Cli {
    /// Base URL of the catalog backend; overrides file and env settings.
    #[arg(long)]
    server_url: Option<String>,

    /// Path to a TOML settings file. Without this flag, `catalog.toml` in the
    /// working directory is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let server_url = Url::parse(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    tracing::info!(%server_url, "starting desktop catalog client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(
        BridgeConfig {
            server_url,
            request_timeout: Duration::from_secs(settings.request_timeout_seconds),
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Product Catalog")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Product Catalog",
        options,
        Box::new(move |_cc| Ok(Box::new(CatalogApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop ui: {err}"))
}
