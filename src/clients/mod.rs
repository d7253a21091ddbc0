//! Cloneable handles for talking to service tasks.

mod macros;
pub mod inventory_client;

pub use inventory_client::*;
