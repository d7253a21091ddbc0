use tokio::sync::oneshot;

use crate::domain::{InventorySummary, ProductId, ProductRecord};
use crate::error::InventoryError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Outcome of a completed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    pub product_id: ProductId,
    pub quantity: u32,
    pub amount: f64,
    pub remaining: u32,
}

/// Restocking an unknown id is reported, not failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockOutcome {
    Restocked { new_quantity: u32 },
    NotFound,
}

/// Typed messages for the inventory service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum InventoryRequest {
    AddProduct {
        record: ProductRecord,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    SellProduct {
        id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<SaleReceipt, InventoryError>,
    },
    RestockProduct {
        id: ProductId,
        quantity: u32,
        respond_to: ServiceResponse<RestockOutcome, InventoryError>,
    },
    ListAll {
        respond_to: ServiceResponse<Vec<ProductRecord>, InventoryError>,
    },
    LowStockScan {
        threshold: u32,
        respond_to: ServiceResponse<Vec<ProductRecord>, InventoryError>,
    },
    AggregateReport {
        respond_to: ServiceResponse<InventorySummary, InventoryError>,
    },
    TotalSales {
        respond_to: ServiceResponse<f64, InventoryError>,
    },
    Shutdown,
}
