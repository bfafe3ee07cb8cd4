use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::OrderId;

/// Errors surfaced by catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Order already exists: {0}")]
    DuplicateOrder(OrderId),
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] ValidationError),
    #[error("Comparator failed while sorting; catalog left unchanged")]
    InvalidComparator,
    #[error("Catalog codec error: {0}")]
    Codec(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl CatalogError {
    /// The request clashed with an order already in the catalog (409-class).
    pub fn is_conflict(&self) -> bool {
        matches!(self, CatalogError::DuplicateOrder(_))
    }

    /// The request named an order the catalog does not hold (404-class).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::OrderNotFound(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Codec(err.to_string())
    }
}

/// Reasons an order is refused before it reaches the catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("order id must be positive, got {0}")]
    NonPositiveId(OrderId),
    #[error("order {0} has no details")]
    NoDetails(OrderId),
    #[error("order {0} has a customer without a name")]
    EmptyCustomerName(OrderId),
    #[error("order {0} has a product without a name")]
    EmptyProductName(OrderId),
    #[error("product {product} has negative price {price}")]
    NegativePrice { product: String, price: Decimal },
    #[error("product {product} has zero quantity")]
    ZeroQuantity { product: String },
    #[error("duplicate detail: {product} x {quantity}")]
    DuplicateDetail { product: String, quantity: u32 },
}
