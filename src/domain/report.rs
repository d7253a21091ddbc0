use std::fmt::Display;

use super::{ProductId, ProductRecord};

const RULE_WIDTH: usize = 60;
const THIN_RULE: &str = "-------------------------------------------------------------";

/// One product row of the daily report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl From<&ProductRecord> for ReportLine {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            price: record.price,
            quantity: record.quantity,
        }
    }
}

/// Aggregate view of the inventory plus the session's sales total.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_items_remaining: u64,
    pub total_stock_value: f64,
    pub total_sales_today: f64,
    pub lines: Vec<ReportLine>,
}

impl InventorySummary {
    /// Totals block shared by the console view and the report artifact.
    pub fn totals_block(&self) -> String {
        format!(
            "Total Products in Stock: {}\nTotal Items Remaining: {}\nTotal Stock Value: ₹ {}\nTotal Sales Today: ₹ {}\n",
            self.total_products,
            self.total_items_remaining,
            format_currency(self.total_stock_value),
            format_currency(self.total_sales_today),
        )
    }

    /// Render the persisted report text.
    pub fn render(&self, generated_at: impl Display) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut report = String::new();
        report.push_str(" DAILY INVENTORY REPORT\n");
        report.push_str(&format!("Generated on: {}\n", generated_at));
        report.push_str(&rule);
        report.push('\n');
        report.push_str(&self.totals_block());
        report.push_str(&rule);
        report.push_str("\n\n");
        report.push_str("PRODUCT DETAILS:\n");
        report.push_str(THIN_RULE);
        report.push('\n');
        for line in &self.lines {
            report.push_str(&format!(
                "ID: {} | {} | Price: ₹{:.1} | Qty: {}\n",
                line.id, line.name, line.price, line.quantity
            ));
        }
        report
    }
}

/// Two decimals with comma thousands grouping, e.g. `12,345.60`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}
