use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::macros::client_method;
use crate::domain::{InventorySummary, ProductId, ProductRecord};
use crate::error::InventoryError;
use crate::messages::{InventoryRequest, RestockOutcome, SaleReceipt};

/// Client for the inventory service.
#[derive(Clone, Debug)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|e| InventoryError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(InventoryClient => fn add_product(record: ProductRecord) -> () as InventoryRequest::AddProduct, Error = InventoryError);
client_method!(InventoryClient => fn sell_product(id: ProductId, quantity: u32) -> SaleReceipt as InventoryRequest::SellProduct, Error = InventoryError);
client_method!(InventoryClient => fn restock_product(id: ProductId, quantity: u32) -> RestockOutcome as InventoryRequest::RestockProduct, Error = InventoryError);
client_method!(InventoryClient => fn list_all() -> Vec<ProductRecord> as InventoryRequest::ListAll, Error = InventoryError);
client_method!(InventoryClient => fn low_stock_scan(threshold: u32) -> Vec<ProductRecord> as InventoryRequest::LowStockScan, Error = InventoryError);
client_method!(InventoryClient => fn aggregate_report() -> InventorySummary as InventoryRequest::AggregateReport, Error = InventoryError);
client_method!(InventoryClient => fn total_sales() -> f64 as InventoryRequest::TotalSales, Error = InventoryError);
