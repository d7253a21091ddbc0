use serde::{Deserialize, Serialize};

/// Product identifiers are chosen by the operator, not generated.
pub type ProductId = u32;

/// Stock at or above this level is considered healthy.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Variant-specific metadata for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Free-text expiry date, conventionally `DD-MM-YYYY`. Never validated.
    Perishable { expiry_date: String },
    /// Free-text warranty description, may be `N/A`.
    NonPerishable { warranty: String },
}

impl ProductKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Perishable { .. } => "Perishable",
            ProductKind::NonPerishable { .. } => "Non-Perishable",
        }
    }

    fn extra_info(&self) -> String {
        match self {
            ProductKind::Perishable { expiry_date } => format!("Expiry: {}", expiry_date),
            ProductKind::NonPerishable { warranty } => format!("Warranty: {}", warranty),
        }
    }
}

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(flatten)]
    pub kind: ProductKind,
}

impl ProductRecord {
    pub fn perishable(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        expiry_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Perishable {
                expiry_date: expiry_date.into(),
            },
        }
    }

    pub fn non_perishable(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        warranty: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::NonPerishable {
                warranty: warranty.into(),
            },
        }
    }

    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }

    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// One fixed-width table row. Variants differ only in the trailing column.
    pub fn describe(&self) -> String {
        format!(
            "{:<6} {:<20} {:<11.1} {:<10} {:<14} {}",
            self.id,
            self.name,
            self.price,
            self.quantity,
            self.kind.label(),
            self.kind.extra_info()
        )
    }
}

/// The records a fresh inventory starts with when nothing could be loaded.
pub fn sample_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord::perishable(101, "Milk", 45.0, 15, "20-10-2025"),
        ProductRecord::non_perishable(102, "Sugar", 55.0, 4, "N/A"),
        ProductRecord::non_perishable(103, "Tea Leaves", 120.0, 2, "N/A"),
        ProductRecord::perishable(104, "Yogurt", 35.0, 25, "30-10-2025"),
    ]
}
