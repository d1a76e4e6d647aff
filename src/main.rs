mod app;
mod chart;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;
mod web;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use config::{Cli, Command, DashboardConfig};
use dashboard::Dashboard;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let dataset = data::loader::load_file(&cli.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", cli.data.display()))
        .with_context(|| format!("loading launch records from {}", cli.data.display()))?;
    log::info!(
        "Loaded {} launches from {} sites {:?}",
        dataset.len(),
        dataset.sites.len(),
        dataset.sites
    );
    if dataset.is_empty() {
        log::warn!("{} contains no launches; charts will be empty", cli.data.display());
    }

    let dashboard = Dashboard::new(Arc::new(dataset), DashboardConfig::default());

    match cli.command() {
        Command::Serve => {
            // One event at a time: callbacks never overlap.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("building tokio runtime")?;
            runtime.block_on(web::serve(Arc::new(dashboard), cli.bind))
        }
        Command::Desktop => app::run(dashboard),
    }
}
