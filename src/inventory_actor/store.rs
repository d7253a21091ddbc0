use tracing::warn;

use crate::domain::{InventorySummary, ProductId, ProductRecord, ReportLine};
use crate::error::InventoryError;
use crate::messages::{RestockOutcome, SaleReceipt};

/// Ordered record store plus the session's running sales total.
///
/// Records keep insertion order. Ids are not checked for uniqueness; every
/// id-based lookup resolves to the first matching record.
#[derive(Debug, Default)]
pub struct Inventory {
    records: Vec<ProductRecord>,
    total_sales: f64,
}

impl Inventory {
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        Self {
            records,
            total_sales: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_sales(&self) -> f64 {
        self.total_sales
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> + '_ {
        self.records.iter()
    }

    pub fn add(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut ProductRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    pub fn get(&self, id: ProductId) -> Option<&ProductRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Rejects before mutating, so a failed sale leaves quantity and ledger untouched.
    pub fn sell(&mut self, id: ProductId, quantity: u32) -> Result<SaleReceipt, InventoryError> {
        let record = self.find_mut(id).ok_or(InventoryError::NotFound(id))?;
        if quantity > record.quantity {
            return Err(InventoryError::InsufficientStock {
                requested: quantity,
                available: record.quantity,
            });
        }

        record.quantity -= quantity;
        let amount = f64::from(quantity) * record.price;
        let receipt = SaleReceipt {
            product_id: id,
            quantity,
            amount,
            remaining: record.quantity,
        };
        self.total_sales += amount;
        Ok(receipt)
    }

    pub fn restock(&mut self, id: ProductId, quantity: u32) -> RestockOutcome {
        match self.find_mut(id) {
            Some(record) => {
                record.quantity = match record.quantity.checked_add(quantity) {
                    Some(total) => total,
                    None => {
                        warn!(id, quantity, "Restock clamped at the maximum quantity");
                        u32::MAX
                    }
                };
                RestockOutcome::Restocked {
                    new_quantity: record.quantity,
                }
            }
            None => RestockOutcome::NotFound,
        }
    }

    pub fn low_stock(&self, threshold: u32) -> impl Iterator<Item = &ProductRecord> + '_ {
        self.records
            .iter()
            .filter(move |record| record.is_low_stock(threshold))
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            total_products: self.records.len(),
            total_items_remaining: self.records.iter().map(|r| u64::from(r.quantity)).sum(),
            total_stock_value: self.records.iter().map(ProductRecord::stock_value).sum(),
            total_sales_today: self.total_sales,
            lines: self.records.iter().map(ReportLine::from).collect(),
        }
    }
}
