use std::cmp::Ordering;
use std::fmt;

use tokio::sync::oneshot;

use crate::catalog::OrderQuery;
use crate::domain::{Order, OrderId};
use crate::error::CatalogError;

/// Generic type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, CatalogError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Caller-supplied ordering shipped to the catalog service for `SortBy`.
pub struct OrderComparator(Box<dyn FnMut(&Order, &Order) -> Ordering + Send>);

impl OrderComparator {
    pub fn new(compare: impl FnMut(&Order, &Order) -> Ordering + Send + 'static) -> Self {
        Self(Box::new(compare))
    }

    pub fn compare(&mut self, a: &Order, b: &Order) -> Ordering {
        (self.0)(a, b)
    }
}

impl fmt::Debug for OrderComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderComparator(..)")
    }
}

/// Messages understood by the catalog service. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum CatalogRequest {
    AddOrder {
        order: Order,
        respond_to: ServiceResponse<()>,
    },
    RemoveOrder {
        id: OrderId,
        respond_to: ServiceResponse<Order>,
    },
    ReplaceOrder {
        order: Order,
        respond_to: ServiceResponse<Order>,
    },
    GetOrder {
        id: OrderId,
        respond_to: ServiceResponse<Option<Order>>,
    },
    ListOrders {
        respond_to: ServiceResponse<Vec<Order>>,
    },
    QueryOrders {
        query: OrderQuery,
        respond_to: ServiceResponse<Vec<Order>>,
    },
    SortDefault {
        respond_to: ServiceResponse<()>,
    },
    SortBy {
        comparator: OrderComparator,
        respond_to: ServiceResponse<()>,
    },
    ExportJson {
        respond_to: ServiceResponse<String>,
    },
    ImportJson {
        json: String,
        respond_to: ServiceResponse<usize>,
    },
    Shutdown,
    #[cfg(test)]
    GetOrderCount {
        respond_to: ServiceResponse<usize>,
    },
}
