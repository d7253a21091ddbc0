use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::Inventory;
use crate::clients::InventoryClient;
use crate::domain::{InventorySummary, ProductId, ProductRecord};
use crate::error::InventoryError;
use crate::messages::{InventoryRequest, RestockOutcome, SaleReceipt, ServiceResponse};

/// Sole owner of the [`Inventory`].
///
/// Requests are handled one at a time, so each mutation and each full scan
/// observes the store entirely before or entirely after any other request.
/// The foreground console and the background monitor both reach it through
/// cloned [`InventoryClient`]s.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    inventory: Inventory,
}

impl InventoryService {
    pub fn new(buffer_size: usize, inventory: Inventory) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            inventory,
        };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!(products = self.inventory.len(), "InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::AddProduct { record, respond_to } => {
                    self.handle_add_product(record, respond_to);
                }
                InventoryRequest::SellProduct {
                    id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_sell_product(id, quantity, respond_to);
                }
                InventoryRequest::RestockProduct {
                    id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_restock_product(id, quantity, respond_to);
                }
                InventoryRequest::ListAll { respond_to } => {
                    self.handle_list_all(respond_to);
                }
                InventoryRequest::LowStockScan {
                    threshold,
                    respond_to,
                } => {
                    self.handle_low_stock_scan(threshold, respond_to);
                }
                InventoryRequest::AggregateReport { respond_to } => {
                    self.handle_aggregate_report(respond_to);
                }
                InventoryRequest::TotalSales { respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.total_sales()));
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
            }
        }

        info!("InventoryService stopped");
    }

    /// Appends unconditionally; duplicate ids are accepted.
    #[instrument(fields(product_id = record.id, product_name = %record.name), skip(self, record, respond_to))]
    fn handle_add_product(
        &mut self,
        record: ProductRecord,
        respond_to: ServiceResponse<(), InventoryError>,
    ) {
        debug!("Processing add_product request");

        if self.inventory.get(record.id).is_some() {
            warn!("Duplicate product id added; later entry is unreachable by id");
        }
        self.inventory.add(record);
        info!(products = self.inventory.len(), "Product added");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip_all, fields(product_id = id, quantity = quantity))]
    fn handle_sell_product(
        &mut self,
        id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<SaleReceipt, InventoryError>,
    ) {
        debug!("Processing sell_product request");

        let result = self.inventory.sell(id, quantity);
        match &result {
            Ok(receipt) => info!(
                remaining = receipt.remaining,
                amount = receipt.amount,
                total_sales = self.inventory.total_sales(),
                "Sale recorded"
            ),
            Err(e) => warn!(error = %e, "Sale rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(skip_all, fields(product_id = id, quantity = quantity))]
    fn handle_restock_product(
        &mut self,
        id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<RestockOutcome, InventoryError>,
    ) {
        debug!("Processing restock_product request");

        let outcome = self.inventory.restock(id, quantity);
        match outcome {
            RestockOutcome::Restocked { new_quantity } => info!(new_quantity, "Product restocked"),
            RestockOutcome::NotFound => warn!("Restock target not found"),
        }

        let _ = respond_to.send(Ok(outcome));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_all(&self, respond_to: ServiceResponse<Vec<ProductRecord>, InventoryError>) {
        debug!("Processing list_all request");

        let records: Vec<ProductRecord> = self.inventory.iter().cloned().collect();
        debug!(product_count = records.len(), "Listed products");

        let _ = respond_to.send(Ok(records));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_low_stock_scan(
        &self,
        threshold: u32,
        respond_to: ServiceResponse<Vec<ProductRecord>, InventoryError>,
    ) {
        debug!("Processing low_stock_scan request");

        let low: Vec<ProductRecord> = self.inventory.low_stock(threshold).cloned().collect();
        debug!(low_stock_count = low.len(), "Low stock scanned");

        let _ = respond_to.send(Ok(low));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_aggregate_report(&self, respond_to: ServiceResponse<InventorySummary, InventoryError>) {
        debug!("Processing aggregate_report request");

        let summary = self.inventory.summary();
        info!(
            total_items = summary.total_items_remaining,
            total_value = summary.total_stock_value,
            "Aggregate computed"
        );

        let _ = respond_to.send(Ok(summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_products;

    fn start(records: Vec<ProductRecord>) -> (InventoryClient, tokio::task::JoinHandle<()>) {
        let (service, client) = InventoryService::new(16, Inventory::with_records(records));
        (client, tokio::spawn(service.run()))
    }

    #[tokio::test]
    async fn test_sell_through_service() -> Result<(), Box<dyn std::error::Error>> {
        let (client, handle) = start(sample_products());

        let receipt = client.sell_product(101, 5).await?;
        assert_eq!(receipt.remaining, 10);
        assert_eq!(client.total_sales().await?, 225.0);

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_business_failures_are_returned() -> Result<(), Box<dyn std::error::Error>> {
        let (client, _handle) = start(sample_products());

        assert_eq!(
            client.sell_product(103, 3).await,
            Err(InventoryError::InsufficientStock {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(
            client.sell_product(555, 1).await,
            Err(InventoryError::NotFound(555))
        );
        assert_eq!(client.restock_product(555, 1).await?, RestockOutcome::NotFound);
        assert_eq!(client.total_sales().await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_then_list_preserves_order() -> Result<(), Box<dyn std::error::Error>> {
        let (client, _handle) = start(Vec::new());

        assert!(client.list_all().await?.is_empty());

        client
            .add_product(ProductRecord::non_perishable(1, "Rice", 60.0, 3, "N/A"))
            .await?;
        client
            .add_product(ProductRecord::perishable(2, "Bread", 30.0, 12, "01-11-2025"))
            .await?;

        let ids: Vec<ProductId> = client.list_all().await?.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let low = client.low_stock_scan(10).await?;
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Rice");
        Ok(())
    }

    #[tokio::test]
    async fn test_client_fails_after_shutdown() -> Result<(), Box<dyn std::error::Error>> {
        let (client, handle) = start(sample_products());
        client.shutdown().await?;
        handle.await?;

        assert!(matches!(
            client.list_all().await,
            Err(InventoryError::ActorCommunicationError(_))
        ));
        Ok(())
    }
}
