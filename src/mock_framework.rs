//! # Mock Framework
//!
//! Utilities for testing code that talks to the inventory service without
//! running the service itself.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! request channel, then use helpers like [`expect_low_stock_scan`] to assert
//! which request arrived and script the reply.

use tokio::sync::mpsc;

use crate::clients::InventoryClient;
use crate::domain::{ProductId, ProductRecord};
use crate::error::InventoryError;
use crate::messages::{InventoryRequest, SaleReceipt, ServiceResponse};

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client(buffer_size: usize) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a LowStockScan request
pub async fn expect_low_stock_scan(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(u32, ServiceResponse<Vec<ProductRecord>, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::LowStockScan {
            threshold,
            respond_to,
        }) => Some((threshold, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a SellProduct request
pub async fn expect_sell(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductId, u32, ServiceResponse<SaleReceipt, InventoryError>)> {
    match receiver.recv().await {
        Some(InventoryRequest::SellProduct {
            id,
            quantity,
            respond_to,
        }) => Some((id, quantity, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let sell_task = tokio::spawn(async move { client.sell_product(101, 3).await });

        let (id, quantity, responder) = expect_sell(&mut receiver).await.expect("Expected Sell request");
        assert_eq!((id, quantity), (101, 3));
        responder
            .send(Err(InventoryError::InsufficientStock {
                requested: 3,
                available: 1,
            }))
            .unwrap();

        let result = sell_task.await.unwrap();
        assert_eq!(
            result,
            Err(InventoryError::InsufficientStock {
                requested: 3,
                available: 1
            })
        );
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let sell_task = tokio::spawn(async move { client.sell_product(7, 1).await });
        let (_, _, responder) = expect_sell(&mut receiver).await.unwrap();
        drop(responder);

        assert!(matches!(
            sell_task.await.unwrap(),
            Err(InventoryError::ActorCommunicationError(_))
        ));
    }
}
