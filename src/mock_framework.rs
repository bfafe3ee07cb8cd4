//! # Mock Framework
//!
//! Utilities for testing [`CatalogClient`] in isolation.
//!
//! [`create_mock_client`] returns a client wired to a receiver the test owns.
//! Helpers such as [`expect_add`] pull the next request off that receiver so
//! the test can inspect it and answer through its `respond_to` channel.

use tokio::sync::mpsc;

use crate::catalog::OrderQuery;
use crate::clients::CatalogClient;
use crate::domain::{Order, OrderId};
use crate::messages::{CatalogRequest, ServiceResponse};

/// Creates a client whose requests land on the returned receiver instead of a
/// running service.
pub fn create_mock_client(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Next message, if it is an AddOrder request
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(Order, ServiceResponse<()>)> {
    match receiver.recv().await {
        Some(CatalogRequest::AddOrder { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a ReplaceOrder request
pub async fn expect_replace(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(Order, ServiceResponse<Order>)> {
    match receiver.recv().await {
        Some(CatalogRequest::ReplaceOrder { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a RemoveOrder request
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(OrderId, ServiceResponse<Order>)> {
    match receiver.recv().await {
        Some(CatalogRequest::RemoveOrder { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a QueryOrders request
pub async fn expect_query(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(OrderQuery, ServiceResponse<Vec<Order>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::QueryOrders { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::fixtures::*;
    use crate::error::{CatalogError, ValidationError};

    #[tokio::test]
    async fn test_add_order_forwards_valid_order() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move { client.add_order(alice_order()).await });

        let (order, responder) = expect_add(&mut receiver).await.expect("Expected AddOrder request");
        assert_eq!(order.order_id, 1);
        assert_eq!(order.total_amount(), Decimal::from(1200));
        responder.send(Ok(())).unwrap();

        assert_eq!(add_task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_invalid_order_never_leaves_client() {
        let (client, mut receiver) = create_mock_client(10);

        let mut empty = alice_order();
        empty.details.clear();
        let result = client.add_order(empty).await;
        assert_eq!(
            result,
            Err(CatalogError::InvalidOrder(ValidationError::NoDetails(1)))
        );

        let mut negative = bob_order();
        negative.order_id = -2;
        let result = client.replace_order(negative).await;
        assert_eq!(
            result,
            Err(CatalogError::InvalidOrder(ValidationError::NonPositiveId(-2)))
        );

        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_replace_returns_displaced_order() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.replace_order(order_totalling(2, "Alice", 5)).await });

        let (order, responder) = expect_replace(&mut receiver).await.expect("Expected ReplaceOrder request");
        assert_eq!(order.customer.name, "Alice");
        responder.send(Ok(bob_order())).unwrap();

        let previous = task.await.unwrap().unwrap();
        assert_eq!(previous.customer.name, "Bob");
    }

    #[tokio::test]
    async fn test_remove_surfaces_not_found() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.remove_order(9).await });

        let (id, responder) = expect_remove(&mut receiver).await.expect("Expected RemoveOrder request");
        assert_eq!(id, 9);
        responder.send(Err(CatalogError::OrderNotFound(9))).unwrap();

        let result = task.await.unwrap();
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_query_helpers_build_matching_criteria() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move {
            let by_product = client.query_by_product_name("Laptop").await?;
            let by_total = client.query_by_min_total(Decimal::from(700)).await?;
            Ok::<_, CatalogError>((by_product, by_total))
        });

        let (query, responder) = expect_query(&mut receiver).await.expect("Expected QueryOrders request");
        assert_eq!(query, OrderQuery::ByProductName("Laptop".to_string()));
        responder.send(Ok(vec![alice_order()])).unwrap();

        let (query, responder) = expect_query(&mut receiver).await.expect("Expected QueryOrders request");
        assert_eq!(query, OrderQuery::ByMinTotal(Decimal::from(700)));
        responder.send(Ok(Vec::new())).unwrap();

        let (by_product, by_total) = task.await.unwrap().unwrap();
        assert_eq!(by_product.len(), 1);
        assert!(by_total.is_empty());
    }

    #[tokio::test]
    async fn test_closed_service_is_communication_error() {
        let (client, receiver) = create_mock_client(1);
        drop(receiver);

        let result = client.list_orders().await;
        assert!(matches!(result, Err(CatalogError::ActorCommunication(_))));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_client(1);

        let task = tokio::spawn(async move { client.get_order(1).await });
        drop(receiver.recv().await);

        let result = task.await.unwrap();
        assert_eq!(
            result,
            Err(CatalogError::ActorCommunication("Actor dropped".to_string()))
        );
    }
}
