//! Drilling Cost Pro - Oil Well Cost Estimation Dashboard
//!
//! Rig cost breakdowns, cost calculators and service-generated charts
//! in a native egui window.

mod api;
mod charts;
mod config;
mod cost;
mod data;
mod gui;

use anyhow::Context;
use api::{CostApi, HttpCostApi};
use config::AppConfig;
use eframe::egui;
use gui::DrillCostApp;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_default_sources().context("failed to load configuration")?;
    let client =
        HttpCostApi::from_config(&config).context("failed to build cost service client")?;
    info!(api = %client.base_url(), export_dir = %config.export_dir.display(), "starting dashboard");
    let api: Arc<dyn CostApi> = Arc::new(client);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Oil Well Cost Estimation Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Oil Well Cost Estimation Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DrillCostApp::new(cc, config, api)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run dashboard: {e}"))
}
