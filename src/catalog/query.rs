//! Filter-then-sort views over the catalog.
//!
//! Every query returns a fresh `Vec<Order>` sorted ascending by total amount.
//! The sort is stable, so orders with equal totals keep catalog order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderCatalog;
use crate::domain::{Order, OrderId};

/// A single query criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderQuery {
    ByOrderId(OrderId),
    ByProductName(String),
    ByCustomerName(String),
    /// Inclusive lower bound on the order total.
    ByMinTotal(Decimal),
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderQuery::ByOrderId(id) => order.order_id == *id,
            OrderQuery::ByProductName(name) => order.has_product(name),
            OrderQuery::ByCustomerName(name) => order.customer.name == *name,
            OrderQuery::ByMinTotal(amount) => order.total_amount() >= *amount,
        }
    }
}

impl OrderCatalog {
    pub fn query(&self, query: &OrderQuery) -> Vec<Order> {
        let mut found: Vec<Order> = self
            .iter()
            .filter(|order| query.matches(order))
            .cloned()
            .collect();
        found.sort_by_cached_key(Order::total_amount);
        found
    }

    pub fn query_by_order_id(&self, order_id: OrderId) -> Vec<Order> {
        self.query(&OrderQuery::ByOrderId(order_id))
    }

    /// Orders with at least one line for `name` (exact, case-sensitive).
    pub fn query_by_product_name(&self, name: &str) -> Vec<Order> {
        self.query(&OrderQuery::ByProductName(name.to_string()))
    }

    pub fn query_by_customer_name(&self, name: &str) -> Vec<Order> {
        self.query(&OrderQuery::ByCustomerName(name.to_string()))
    }

    /// Orders whose total is at least `amount`.
    pub fn query_by_min_total(&self, amount: Decimal) -> Vec<Order> {
        self.query(&OrderQuery::ByMinTotal(amount))
    }
}
