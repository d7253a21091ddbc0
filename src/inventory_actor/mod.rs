//! Inventory ownership: the record store and the service task that guards it.

pub mod service;
pub mod store;

pub use service::*;
pub use store::*;
