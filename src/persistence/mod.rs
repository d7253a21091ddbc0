//! Durable storage boundary for records and reports.
//!
//! The rest of the program only sees [`InventoryGateway`]; file paths live in
//! the concrete gateways. Calls are synchronous and only ever made from the
//! foreground path.

mod file;
#[cfg(test)]
mod memory;

pub use file::FileGateway;
#[cfg(test)]
pub use memory::MemoryGateway;

use std::path::Path;

use crate::domain::ProductRecord;
use crate::error::PersistenceError;

pub trait InventoryGateway: Send + Sync {
    /// Returns [`PersistenceError::NotFound`] when nothing was saved before.
    fn load(&self) -> Result<Vec<ProductRecord>, PersistenceError>;

    /// Replaces any previously saved records.
    fn save(&self, records: &[ProductRecord]) -> Result<(), PersistenceError>;

    /// Replaces any previously saved report.
    fn save_report(&self, text: &str) -> Result<(), PersistenceError>;

    /// Where [`save_report`](Self::save_report) writes, for user messages.
    fn report_location(&self) -> &Path;
}
