//! The in-memory order catalog.
//!
//! [`OrderCatalog`] is plain synchronous state. It enforces id uniqueness and
//! keeps the working set in a caller-visible order (insertion order until one
//! of the sort operations rearranges it). Sharing it between tasks goes through
//! [`crate::actors::CatalogService`], which serializes every operation.

mod codec;
mod query;

pub use query::OrderQuery;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use crate::domain::{Order, OrderId};
use crate::error::CatalogError;

/// Authoritative collection of orders, unique by `order_id`.
#[derive(Debug, Clone, Default)]
pub struct OrderCatalog {
    orders: Vec<Order>,
    // order_id -> index into `orders`
    positions: HashMap<OrderId, usize>,
}

impl OrderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `order`, failing if its id is already taken.
    pub fn add(&mut self, order: Order) -> Result<(), CatalogError> {
        if self.positions.contains_key(&order.order_id) {
            return Err(CatalogError::DuplicateOrder(order.order_id));
        }
        self.positions.insert(order.order_id, self.orders.len());
        self.orders.push(order);
        Ok(())
    }

    /// Removes the order with `order_id` and hands it back.
    pub fn remove(&mut self, order_id: OrderId) -> Result<Order, CatalogError> {
        let position = self
            .positions
            .remove(&order_id)
            .ok_or(CatalogError::OrderNotFound(order_id))?;
        let removed = self.orders.remove(position);
        self.reindex_from(position);
        Ok(removed)
    }

    /// Swaps in `order` where the order with the same id sits, returning the
    /// one it displaced.
    pub fn replace(&mut self, order: Order) -> Result<Order, CatalogError> {
        let position = *self
            .positions
            .get(&order.order_id)
            .ok_or(CatalogError::OrderNotFound(order.order_id))?;
        Ok(std::mem::replace(&mut self.orders[position], order))
    }

    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.positions.get(&order_id).map(|&i| &self.orders[i])
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.positions.contains_key(&order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Snapshot of every order in current catalog order.
    pub fn all(&self) -> Vec<Order> {
        self.orders.clone()
    }

    /// Reorders the catalog ascending by order id.
    pub fn sort_default(&mut self) {
        self.orders.sort_by_key(|order| order.order_id);
        self.reindex_from(0);
    }

    /// Reorders the catalog with a caller-supplied comparator.
    ///
    /// The sort is stable, so orders the comparator considers equal keep their
    /// relative position. The comparator should be a total order; if it panics,
    /// or the sort panics because it is not one, the catalog is left exactly as
    /// it was and `InvalidComparator` is returned.
    pub fn sort_by<F>(&mut self, compare: F) -> Result<(), CatalogError>
    where
        F: FnMut(&Order, &Order) -> Ordering,
    {
        let mut sorted = self.orders.clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
            sorted.sort_by(compare);
            sorted
        }));

        match outcome {
            Ok(sorted) => {
                self.orders = sorted;
                self.reindex_from(0);
                Ok(())
            }
            Err(_) => Err(CatalogError::InvalidComparator),
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (index, order) in self.orders.iter().enumerate().skip(start) {
            self.positions.insert(order.order_id, index);
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use crate::domain::{Customer, Order, OrderDetail, Product};

    pub fn product(name: &str, price: i64) -> Arc<Product> {
        Arc::new(Product::new(0, name, Decimal::from(price)))
    }

    pub fn customer(name: &str) -> Arc<Customer> {
        Arc::new(Customer::new(0, name))
    }

    /// Order 1: Alice buys a $1000 laptop and two $100 headphones ($1200).
    pub fn alice_order() -> Order {
        Order::new(
            1,
            customer("Alice"),
            vec![
                OrderDetail::new(product("Laptop", 1000), 1),
                OrderDetail::new(product("Headphones", 100), 2),
            ],
        )
    }

    /// Order 2: Bob buys a $600 phone.
    pub fn bob_order() -> Order {
        Order::new(2, customer("Bob"), vec![OrderDetail::new(product("Phone", 600), 1)])
    }

    pub fn order_totalling(order_id: i64, customer_name: &str, total: i64) -> Order {
        Order::new(
            order_id,
            customer(customer_name),
            vec![OrderDetail::new(product("Widget", total), 1)],
        )
    }
}
