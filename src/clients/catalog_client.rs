use std::cmp::Ordering;

use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

use crate::catalog::OrderQuery;
use crate::domain::{Order, OrderId};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, OrderComparator, ServiceResult};

/// Cloneable handle to a running [`crate::actors::CatalogService`].
///
/// `add_order` and `replace_order` validate the order before it is sent, so
/// malformed orders are refused at the edge and never reach the catalog.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn add_order(&self, order: Order) -> ServiceResult<()> {
        if let Err(e) = order.validate() {
            warn!(error = %e, "Refusing invalid order");
            return Err(e.into());
        }
        self.send_add_order(order).await
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn replace_order(&self, order: Order) -> ServiceResult<Order> {
        if let Err(e) = order.validate() {
            warn!(error = %e, "Refusing invalid order");
            return Err(e.into());
        }
        self.send_replace_order(order).await
    }

    pub async fn query_by_order_id(&self, id: OrderId) -> ServiceResult<Vec<Order>> {
        self.query_orders(OrderQuery::ByOrderId(id)).await
    }

    pub async fn query_by_product_name(&self, name: impl Into<String>) -> ServiceResult<Vec<Order>> {
        self.query_orders(OrderQuery::ByProductName(name.into())).await
    }

    pub async fn query_by_customer_name(&self, name: impl Into<String>) -> ServiceResult<Vec<Order>> {
        self.query_orders(OrderQuery::ByCustomerName(name.into())).await
    }

    pub async fn query_by_min_total(&self, amount: Decimal) -> ServiceResult<Vec<Order>> {
        self.query_orders(OrderQuery::ByMinTotal(amount)).await
    }

    /// Reorders the catalog with `compare`, which runs inside the service task.
    /// A comparator that panics yields `InvalidComparator` and the order is kept.
    pub async fn sort_orders_by<F>(&self, compare: F) -> ServiceResult<()>
    where
        F: FnMut(&Order, &Order) -> Ordering + Send + 'static,
    {
        self.send_sort_by(OrderComparator::new(compare)).await
    }

    #[instrument(skip(self, json), fields(bytes = json.len()))]
    pub async fn import_json(&self, json: String) -> ServiceResult<usize> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::ImportJson { json, respond_to })
            .await
            .map_err(|_| CatalogError::ActorCommunication("Actor closed".to_string()))?;

        response
            .await
            .map_err(|_| CatalogError::ActorCommunication("Actor dropped".to_string()))?
    }

    /// Manual method for special cases (no response needed)
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> ServiceResult<()> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|e| CatalogError::ActorCommunication(e.to_string()))?;
        Ok(())
    }
}

// Generate client methods with automatic tracing
client_method!(CatalogClient => fn send_add_order(order: Order) -> () as CatalogRequest::AddOrder);
client_method!(CatalogClient => fn send_replace_order(order: Order) -> Order as CatalogRequest::ReplaceOrder);
client_method!(CatalogClient => fn send_sort_by(comparator: OrderComparator) -> () as CatalogRequest::SortBy);
client_method!(CatalogClient => pub fn remove_order(id: OrderId) -> Order as CatalogRequest::RemoveOrder);
client_method!(CatalogClient => pub fn get_order(id: OrderId) -> Option<Order> as CatalogRequest::GetOrder);
client_method!(CatalogClient => pub fn list_orders() -> Vec<Order> as CatalogRequest::ListOrders);
client_method!(CatalogClient => pub fn query_orders(query: OrderQuery) -> Vec<Order> as CatalogRequest::QueryOrders);
client_method!(CatalogClient => pub fn sort_orders() -> () as CatalogRequest::SortDefault);
client_method!(CatalogClient => pub fn export_json() -> String as CatalogRequest::ExportJson);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(CatalogClient => pub fn get_order_count() -> usize as CatalogRequest::GetOrderCount);
