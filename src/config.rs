use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::domain::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::monitor::MonitorConfig;
use crate::persistence::FileGateway;

/// Console inventory tracker with background low-stock monitoring.
#[derive(Debug, Clone, Parser)]
#[command(name = "smart_inventory", version)]
pub struct Config {
    /// Where inventory records are loaded from and saved to
    #[arg(long, default_value = "inventory.json")]
    pub data_file: PathBuf,

    /// Where generated reports are written (overwritten each time)
    #[arg(long, default_value = "report.txt")]
    pub report_file: PathBuf,

    /// Seconds between background low-stock checks
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub monitor_interval_secs: u64,

    /// Products with fewer units than this are low on stock
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub low_stock_threshold: u32,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval: Duration::from_secs(self.monitor_interval_secs),
            threshold: self.low_stock_threshold,
        }
    }

    pub fn gateway(&self) -> FileGateway {
        FileGateway::new(&self.data_file, &self.report_file)
    }
}
