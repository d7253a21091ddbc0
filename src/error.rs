use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("No saved data at {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return PersistenceError::NotFound(path.into());
        }
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures of the foreground flows that combine the service and the gateway.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
