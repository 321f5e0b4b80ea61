use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use rusty_bnb::app::ListingsApp;
use rusty_bnb::config::{ListingsCli, ViewerConfig};
use rusty_bnb::data::loader::load_listings;
use rusty_bnb::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = ListingsCli::parse();

    // A table that fails to load never reaches the window.
    let table = load_listings(&cli.data)
        .with_context(|| format!("loading listings from {}", cli.data.display()))?;
    log::info!(
        "Loaded {} listings ({} room types, {} neighbourhood groups)",
        table.len(),
        table.room_types().len(),
        table.neighbourhood_groups().len()
    );

    let description = cli
        .description
        .as_deref()
        .map(std::fs::read_to_string)
        .transpose()
        .context("reading description file")?;

    let mut state = AppState::new(Arc::new(table), cli.empty_filter);
    state.description = description;

    let config = ViewerConfig::listings();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(ListingsApp::new(state, title)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
