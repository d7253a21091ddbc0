//! Periodic low-stock check running beside the console.
//!
//! The monitor only reads, and only through [`InventoryClient::low_stock_scan`].
//! Its sleep happens outside any service request, and both the sleep and an
//! in-flight scan are abandoned as soon as the stop token fires.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::InventoryClient;
use crate::domain::{ProductRecord, DEFAULT_LOW_STOCK_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub interval: Duration,
    pub threshold: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Emitted after a scan that found at least one low-stock product.
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockAlert {
    pub count: usize,
    pub names: Vec<String>,
}

impl LowStockAlert {
    fn from_records(records: &[ProductRecord]) -> Self {
        Self {
            count: records.len(),
            names: records.iter().map(|r| r.name.clone()).collect(),
        }
    }
}

impl std::fmt::Display for LowStockAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Background Alert] {} product(s) running low on stock!",
            self.count
        )
    }
}

pub struct StockMonitor {
    client: InventoryClient,
    config: MonitorConfig,
    alerts: mpsc::Sender<LowStockAlert>,
    token: CancellationToken,
}

impl StockMonitor {
    /// Start the monitor on the current runtime. Alerts are dropped rather
    /// than waited on when the alert channel is full.
    pub fn spawn(
        client: InventoryClient,
        config: MonitorConfig,
        alerts: mpsc::Sender<LowStockAlert>,
    ) -> MonitorHandle {
        let token = CancellationToken::new();
        let monitor = Self {
            client,
            config,
            alerts,
            token: token.clone(),
        };
        let handle = tokio::spawn(monitor.run());
        MonitorHandle { token, handle }
    }

    #[instrument(
        name = "stock_monitor",
        skip_all,
        fields(interval = ?self.config.interval, threshold = self.config.threshold)
    )]
    async fn run(self) {
        info!("StockMonitor starting");

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }

            let scan = tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                scan = self.client.low_stock_scan(self.config.threshold) => scan,
            };

            match scan {
                Ok(low) if low.is_empty() => debug!("All products are well stocked"),
                Ok(low) => {
                    let alert = LowStockAlert::from_records(&low);
                    warn!(low_stock_count = alert.count, products = ?alert.names, "Products running low on stock");
                    if let Err(e) = self.alerts.try_send(alert) {
                        debug!(error = %e, "Alert not delivered");
                    }
                }
                Err(e) => {
                    error!(error = %e, "Low stock scan failed, monitor exiting");
                    break;
                }
            }
        }

        info!("StockMonitor stopped");
    }
}

/// Owner-side handle of a running [`StockMonitor`].
pub struct MonitorHandle {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn state(&self) -> MonitorState {
        if self.token.is_cancelled() || self.handle.is_finished() {
            MonitorState::Stopped
        } else {
            MonitorState::Running
        }
    }

    /// Signal the monitor to stop. Idempotent.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub async fn stop_and_wait(self) -> Result<(), JoinError> {
        self.stop();
        self.handle.await
    }
}
