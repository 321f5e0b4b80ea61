use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use rusty_bnb::app::StudentsApp;
use rusty_bnb::config::{StudentsCli, ViewerConfig};
use rusty_bnb::students::load_students;

fn main() -> Result<()> {
    env_logger::init();
    let cli = StudentsCli::parse();

    let table = load_students(&cli.data)
        .with_context(|| format!("loading students from {}", cli.data.display()))?;
    log::info!(
        "Loaded {} students with columns {:?}",
        table.len(),
        table.columns
    );

    let config = ViewerConfig::students();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(StudentsApp::new(table)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
