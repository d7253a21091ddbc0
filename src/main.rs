mod app_system;
mod clients;
mod config;
mod console;
mod domain;
mod error;
mod inventory_actor;
mod messages;
mod monitor;
mod persistence;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;

use crate::app_system::{setup_tracing, InventorySource, InventorySystem};
use crate::config::Config;
use crate::console::Console;

const ALERT_BUFFER: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing(&config.log_level);

    info!(?config, "Starting Smart Inventory System");

    let (alert_tx, alert_rx) = mpsc::channel(ALERT_BUFFER);
    let system = InventorySystem::start(
        Arc::new(config.gateway()),
        config.monitor_config(),
        alert_tx,
    );

    match &system.source {
        InventorySource::Loaded(count) => {
            println!("Inventory loaded successfully! ({} products)", count)
        }
        InventorySource::Seeded => {
            println!("No previous data found. Sample data loaded successfully!")
        }
        InventorySource::SeededAfterError(message) => {
            println!("Error loading data: {}", message);
            println!("Sample data loaded instead.")
        }
    }

    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        alert_rx,
        config.low_stock_threshold,
    );
    let result = console.run(&system).await;

    info!(monitor = ?system.monitor_state(), "Console closed");
    system.shutdown().await?;
    result.context("console I/O failed")?;

    info!("Smart Inventory System exited");
    Ok(())
}
