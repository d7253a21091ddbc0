use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::clients::InventoryClient;
use crate::domain::{sample_products, InventorySummary, ProductRecord};
use crate::error::{AppError, InventoryError, PersistenceError};
use crate::inventory_actor::{Inventory, InventoryService};
use crate::monitor::{LowStockAlert, MonitorConfig, MonitorHandle, MonitorState, StockMonitor};
use crate::persistence::InventoryGateway;

const SERVICE_BUFFER: usize = 100;

/// Where the starting records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    Loaded(usize),
    Seeded,
    /// Saved data existed but could not be read; carries the load error.
    SeededAfterError(String),
}

/// A rendered report together with the figures it was built from.
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: InventorySummary,
    pub text: String,
}

/// Owns the inventory service task, the background monitor, and the
/// persistence gateway.
///
/// Startup loads (or seeds) the records before the service starts, and
/// shutdown stops the monitor before the service so the monitor never scans
/// a closed channel.
pub struct InventorySystem {
    pub inventory_client: InventoryClient,
    pub source: InventorySource,
    gateway: Arc<dyn InventoryGateway>,
    monitor: MonitorHandle,
    service_handle: tokio::task::JoinHandle<()>,
}

impl InventorySystem {
    #[instrument(name = "inventory_system", skip_all)]
    pub fn start(
        gateway: Arc<dyn InventoryGateway>,
        monitor_config: MonitorConfig,
        alerts: mpsc::Sender<LowStockAlert>,
    ) -> Self {
        info!("Starting inventory system");

        let (records, source) = load_or_seed(gateway.as_ref());

        let (service, inventory_client) =
            InventoryService::new(SERVICE_BUFFER, Inventory::with_records(records));
        let service_handle = tokio::spawn(service.run());

        let monitor = StockMonitor::spawn(inventory_client.clone(), monitor_config, alerts);

        info!(?source, "Inventory system started");

        Self {
            inventory_client,
            source,
            gateway,
            monitor,
            service_handle,
        }
    }

    pub fn monitor_state(&self) -> MonitorState {
        self.monitor.state()
    }

    pub fn report_location(&self) -> &Path {
        self.gateway.report_location()
    }

    /// Compute the aggregate and render it with the current local time.
    #[instrument(skip(self))]
    pub async fn build_report(&self) -> Result<Report, InventoryError> {
        let summary = self.inventory_client.aggregate_report().await?;
        let generated_at = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
        let text = summary.render(generated_at);
        Ok(Report { summary, text })
    }

    #[instrument(skip(self, report))]
    pub fn save_report(&self, report: &Report) -> Result<(), PersistenceError> {
        self.gateway.save_report(&report.text).map_err(|e| {
            error!(error = %e, "Report save failed");
            e
        })
    }

    /// Snapshot the records and hand them to the gateway.
    #[instrument(skip(self))]
    pub async fn save_inventory(&self) -> Result<usize, AppError> {
        let records = self.inventory_client.list_all().await?;
        if let Err(e) = self.gateway.save(&records) {
            error!(error = %e, "Inventory save failed");
            return Err(e.into());
        }
        info!(records = records.len(), "Inventory saved");
        Ok(records.len())
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), InventoryError> {
        info!("Shutting down inventory system");

        if let Err(e) = self.monitor.stop_and_wait().await {
            error!(error = ?e, "Monitor shutdown error");
        }

        // The service may already be gone; shutdown must not hang on it.
        let _ = self.inventory_client.shutdown().await;
        if let Err(e) = self.service_handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(InventoryError::ActorCommunicationError(e.to_string()));
        }

        info!("Inventory system shutdown complete");
        Ok(())
    }
}

/// Load saved records, falling back to the sample set when nothing usable
/// was saved. Load failures never abort startup.
fn load_or_seed(gateway: &dyn InventoryGateway) -> (Vec<ProductRecord>, InventorySource) {
    match gateway.load() {
        Ok(records) if !records.is_empty() => {
            info!(records = records.len(), "Inventory loaded");
            let count = records.len();
            return (records, InventorySource::Loaded(count));
        }
        Ok(_) => info!("Saved inventory is empty, seeding samples"),
        Err(PersistenceError::NotFound(path)) => {
            info!(path = %path.display(), "No previous data found, seeding samples")
        }
        Err(e) => {
            warn!(error = %e, "Could not load inventory, seeding samples");
            return (sample_products(), InventorySource::SeededAfterError(e.to_string()));
        }
    }
    (sample_products(), InventorySource::Seeded)
}
