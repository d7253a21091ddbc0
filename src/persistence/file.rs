use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::InventoryGateway;
use crate::domain::ProductRecord;
use crate::error::PersistenceError;

/// Stores records as a JSON array and the report as plain text.
#[derive(Debug, Clone)]
pub struct FileGateway {
    data_path: PathBuf,
    report_path: PathBuf,
}

impl FileGateway {
    pub fn new(data_path: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            report_path: report_path.into(),
        }
    }

    #[cfg(test)]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl InventoryGateway for FileGateway {
    #[instrument(skip(self), fields(path = %self.data_path.display()))]
    fn load(&self) -> Result<Vec<ProductRecord>, PersistenceError> {
        let bytes = fs::read(&self.data_path).map_err(|e| PersistenceError::io(&self.data_path, e))?;
        let records: Vec<ProductRecord> = serde_json::from_slice(&bytes)?;
        debug!(records = records.len(), "Loaded inventory");
        Ok(records)
    }

    #[instrument(skip(self, records), fields(path = %self.data_path.display(), records = records.len()))]
    fn save(&self, records: &[ProductRecord]) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(records)?;
        fs::write(&self.data_path, json).map_err(|e| PersistenceError::io(&self.data_path, e))?;
        debug!("Saved inventory");
        Ok(())
    }

    #[instrument(skip(self, text), fields(path = %self.report_path.display()))]
    fn save_report(&self, text: &str) -> Result<(), PersistenceError> {
        fs::write(&self.report_path, text).map_err(|e| PersistenceError::io(&self.report_path, e))?;
        debug!(bytes = text.len(), "Saved report");
        Ok(())
    }

    fn report_location(&self) -> &Path {
        &self.report_path
    }
}
