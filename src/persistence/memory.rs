use std::path::Path;
use std::sync::Mutex;

use super::InventoryGateway;
use crate::domain::ProductRecord;
use crate::error::PersistenceError;

/// In-memory gateway for tests. `None` records behave like a missing file.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    records: Mutex<Option<Vec<ProductRecord>>>,
    reports: Mutex<Vec<String>>,
}

impl MemoryGateway {
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
            reports: Mutex::default(),
        }
    }

    pub fn saved(&self) -> Option<Vec<ProductRecord>> {
        self.records.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().unwrap().clone()
    }
}

impl InventoryGateway for MemoryGateway {
    fn load(&self) -> Result<Vec<ProductRecord>, PersistenceError> {
        self.records
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| PersistenceError::NotFound("memory".into()))
    }

    fn save(&self, records: &[ProductRecord]) -> Result<(), PersistenceError> {
        *self.records.lock().unwrap() = Some(records.to_vec());
        Ok(())
    }

    fn save_report(&self, text: &str) -> Result<(), PersistenceError> {
        self.reports.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn report_location(&self) -> &Path {
        Path::new("memory")
    }
}
