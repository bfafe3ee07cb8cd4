use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Customer, Product};
use crate::error::ValidationError;

/// Caller-assigned order number. The catalog's only uniqueness key.
pub type OrderId = i64;

/// One line of an order: a product and how many of it were bought.
///
/// Two details are equal when they name the same product with the same
/// quantity, regardless of which `Product` instance they point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub product: Arc<Product>,
    pub quantity: u32,
}

impl OrderDetail {
    pub fn new(product: Arc<Product>, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Unit price times quantity.
    pub fn amount(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

impl PartialEq for OrderDetail {
    fn eq(&self, other: &Self) -> bool {
        self.product.name == other.product.name && self.quantity == other.quantity
    }
}

impl Eq for OrderDetail {}

impl Hash for OrderDetail {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.product.name.hash(state);
        self.quantity.hash(state);
    }
}

impl fmt::Display for OrderDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, quantity: {}, subtotal: {}",
            self.product,
            self.quantity,
            self.amount()
        )
    }
}

/// Represents a customer order.
///
/// Equality and hashing look at `order_id` only; two orders with the same id
/// are the same order as far as the catalog is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer: Arc<Customer>,
    pub details: Vec<OrderDetail>,
}

impl Order {
    pub fn new(order_id: OrderId, customer: Arc<Customer>, details: Vec<OrderDetail>) -> Self {
        Self {
            order_id,
            customer,
            details,
        }
    }

    /// Sum of every detail's amount. An order without details totals zero.
    pub fn total_amount(&self) -> Decimal {
        self.details.iter().map(OrderDetail::amount).sum()
    }

    /// Appends a detail unless an equal one is already on the order.
    pub fn add_detail(&mut self, detail: OrderDetail) -> Result<(), ValidationError> {
        if self.details.contains(&detail) {
            return Err(ValidationError::DuplicateDetail {
                product: detail.product.name.clone(),
                quantity: detail.quantity,
            });
        }
        self.details.push(detail);
        Ok(())
    }

    /// Removes the detail equal to `detail`, returning it if it was present.
    pub fn remove_detail(&mut self, detail: &OrderDetail) -> Option<OrderDetail> {
        let position = self.details.iter().position(|d| d == detail)?;
        Some(self.details.remove(position))
    }

    /// Whether any line on this order is for a product called `name`.
    pub fn has_product(&self, name: &str) -> bool {
        self.details.iter().any(|d| d.product.name == name)
    }

    /// Checks the order is fit to enter a catalog.
    ///
    /// The catalog itself never calls this; callers validate at the edge
    /// before handing an order over.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.order_id <= 0 {
            return Err(ValidationError::NonPositiveId(self.order_id));
        }
        if self.customer.name.trim().is_empty() {
            return Err(ValidationError::EmptyCustomerName(self.order_id));
        }
        if self.details.is_empty() {
            return Err(ValidationError::NoDetails(self.order_id));
        }

        for (index, detail) in self.details.iter().enumerate() {
            let product = &detail.product;
            if product.name.trim().is_empty() {
                return Err(ValidationError::EmptyProductName(self.order_id));
            }
            if product.price < Decimal::ZERO {
                return Err(ValidationError::NegativePrice {
                    product: product.name.clone(),
                    price: product.price,
                });
            }
            if detail.quantity == 0 {
                return Err(ValidationError::ZeroQuantity {
                    product: product.name.clone(),
                });
            }
            if self.details[..index].contains(detail) {
                return Err(ValidationError::DuplicateDetail {
                    product: product.name.clone(),
                    quantity: detail.quantity,
                });
            }
        }

        Ok(())
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order id: {}", self.order_id)?;
        writeln!(f, "{}", self.customer)?;
        writeln!(f, "Details:")?;
        for detail in &self.details {
            writeln!(f, "\t{}", detail)?;
        }
        write!(f, "Total: {}", self.total_amount())
    }
}
