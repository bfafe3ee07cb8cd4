use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{OrderCatalog, OrderQuery};
use crate::clients::CatalogClient;
use crate::domain::{Order, OrderId};
use crate::messages::{CatalogRequest, OrderComparator, ServiceResponse};

/// Owns the one [`OrderCatalog`] and applies requests strictly in arrival
/// order. A request is handled to completion before the next is received, so
/// no reader can observe a half-applied mutation.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    catalog: OrderCatalog,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        Self::with_catalog(buffer_size, OrderCatalog::new())
    }

    /// Starts from an already populated catalog.
    pub fn with_catalog(buffer_size: usize, catalog: OrderCatalog) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, catalog };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    /// Main actor loop. Ends on `Shutdown` or when every client is dropped.
    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!(order_count = self.catalog.len(), "CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::AddOrder { order, respond_to } => {
                    self.handle_add_order(order, respond_to);
                }
                CatalogRequest::RemoveOrder { id, respond_to } => {
                    self.handle_remove_order(id, respond_to);
                }
                CatalogRequest::ReplaceOrder { order, respond_to } => {
                    self.handle_replace_order(order, respond_to);
                }
                CatalogRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                CatalogRequest::ListOrders { respond_to } => {
                    self.handle_list_orders(respond_to);
                }
                CatalogRequest::QueryOrders { query, respond_to } => {
                    self.handle_query_orders(query, respond_to);
                }
                CatalogRequest::SortDefault { respond_to } => {
                    self.handle_sort_default(respond_to);
                }
                CatalogRequest::SortBy {
                    comparator,
                    respond_to,
                } => {
                    self.handle_sort_by(comparator, respond_to);
                }
                CatalogRequest::ExportJson { respond_to } => {
                    self.handle_export_json(respond_to);
                }
                CatalogRequest::ImportJson { json, respond_to } => {
                    self.handle_import_json(json, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
                #[cfg(test)]
                CatalogRequest::GetOrderCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.catalog.len()));
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(
        fields(order_id = %order.order_id, customer = %order.customer.name, total = %order.total_amount()),
        skip(self, order, respond_to)
    )]
    fn handle_add_order(&mut self, order: Order, respond_to: ServiceResponse<()>) {
        debug!("Processing add_order request");

        let result = self.catalog.add(order);
        match &result {
            Ok(()) => info!(order_count = self.catalog.len(), "Order added"),
            Err(e) => warn!(error = %e, "Order rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_remove_order(&mut self, id: OrderId, respond_to: ServiceResponse<Order>) {
        debug!("Processing remove_order request");

        let result = self.catalog.remove(id);
        match &result {
            Ok(_) => info!(order_count = self.catalog.len(), "Order removed"),
            Err(e) => warn!(error = %e, "Order not removed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %order.order_id), skip(self, order, respond_to))]
    fn handle_replace_order(&mut self, order: Order, respond_to: ServiceResponse<Order>) {
        debug!("Processing replace_order request");

        let result = self.catalog.replace(order);
        match &result {
            Ok(previous) => info!(previous_total = %previous.total_amount(), "Order replaced"),
            Err(e) => warn!(error = %e, "Order not replaced"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_get_order(&self, id: OrderId, respond_to: ServiceResponse<Option<Order>>) {
        debug!("Processing get_order request");

        let order = self.catalog.get(id).cloned();

        match &order {
            Some(order) => info!(total = %order.total_amount(), "Order found"),
            None => debug!("Order not found"),
        }

        let _ = respond_to.send(Ok(order));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_orders(&self, respond_to: ServiceResponse<Vec<Order>>) {
        debug!("Processing list_orders request");

        let orders = self.catalog.all();
        info!(order_count = orders.len(), "Listed orders");

        let _ = respond_to.send(Ok(orders));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_query_orders(&self, query: OrderQuery, respond_to: ServiceResponse<Vec<Order>>) {
        debug!("Processing query_orders request");

        let orders = self.catalog.query(&query);
        info!(match_count = orders.len(), "Query complete");

        let _ = respond_to.send(Ok(orders));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_sort_default(&mut self, respond_to: ServiceResponse<()>) {
        debug!("Processing sort_default request");
        self.catalog.sort_default();
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, comparator, respond_to))]
    fn handle_sort_by(&mut self, mut comparator: OrderComparator, respond_to: ServiceResponse<()>) {
        debug!("Processing sort_by request");

        let result = self.catalog.sort_by(|a, b| comparator.compare(a, b));
        if let Err(e) = &result {
            warn!(error = %e, "Sort rejected");
        }

        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_export_json(&self, respond_to: ServiceResponse<String>) {
        debug!("Processing export_json request");
        let _ = respond_to.send(self.catalog.export_json());
    }

    #[instrument(fields(bytes = json.len()), skip(self, json, respond_to))]
    fn handle_import_json(&mut self, json: String, respond_to: ServiceResponse<usize>) {
        debug!("Processing import_json request");

        let result = self.catalog.import_json(&json);
        match &result {
            Ok(imported) => info!(imported, order_count = self.catalog.len(), "Orders imported"),
            Err(e) => warn!(error = %e, "Import rejected"),
        }

        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::*;
    use crate::error::CatalogError;

    /// Demonstrates test-only messages for extracting internal actor state
    #[tokio::test]
    async fn test_catalog_service_internal_state() -> Result<(), Box<dyn std::error::Error>> {
        let (service, client) = CatalogService::new(10);
        let handle = tokio::spawn(service.run());

        assert_eq!(client.get_order_count().await?, 0);

        client.add_order(alice_order()).await?;
        assert_eq!(client.get_order_count().await?, 1);

        let duplicate = client.add_order(order_totalling(1, "Eve", 1)).await;
        assert_eq!(duplicate, Err(CatalogError::DuplicateOrder(1)));
        assert_eq!(client.get_order_count().await?, 1);

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_service_stops_when_clients_dropped() {
        let (service, client) = CatalogService::new(4);
        let handle = tokio::spawn(service.run());
        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_with_catalog_serves_existing_orders() {
        let mut catalog = OrderCatalog::new();
        catalog.add(bob_order()).unwrap();
        let (service, client) = CatalogService::with_catalog(4, catalog);
        tokio::spawn(service.run());

        let order = client.get_order(2).await.unwrap().unwrap();
        assert_eq!(order.customer.name, "Bob");
        assert!(client.get_order(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sort_by_closure_runs_inside_service() {
        let (service, client) = CatalogService::new(8);
        tokio::spawn(service.run());

        client.add_order(order_totalling(1, "Alice", 10)).await.unwrap();
        client.add_order(order_totalling(2, "Bob", 30)).await.unwrap();
        client.add_order(order_totalling(3, "Carol", 20)).await.unwrap();

        client
            .sort_orders_by(|a, b| b.total_amount().cmp(&a.total_amount()))
            .await
            .unwrap();
        let ids: Vec<_> = client.list_orders().await.unwrap().iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        client.sort_orders().await.unwrap();
        let ids: Vec<_> = client.list_orders().await.unwrap().iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_panicking_comparator_is_rejected_and_service_keeps_running() {
        let (service, client) = CatalogService::new(8);
        let handle = tokio::spawn(service.run());

        for id in [3, 1, 2] {
            client.add_order(order_totalling(id, "Alice", id)).await.unwrap();
        }

        let result = client
            .sort_orders_by(|a, b| {
                if a.order_id == 2 || b.order_id == 2 {
                    panic!("cannot compare order 2");
                }
                a.order_id.cmp(&b.order_id)
            })
            .await;
        assert_eq!(result, Err(CatalogError::InvalidComparator));

        let ids: Vec<_> = client.list_orders().await.unwrap().iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        client.add_order(order_totalling(4, "Dave", 4)).await.unwrap();
        assert_eq!(client.get_order_count().await.unwrap(), 4);
        assert_eq!(client.get_order(2).await.unwrap().map(|o| o.order_id), Some(2));

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }
}
