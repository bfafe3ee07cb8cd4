//! # Order Catalog
//!
//! An in-memory order catalog with identity-based uniqueness, multi-criteria
//! queries, and caller-defined ordering, served to concurrent callers through a
//! single actor.
//!
//! ## Layers
//!
//! - **Domain types** - [`Customer`], [`Product`], [`OrderDetail`], [`Order`] with
//!   derived amounts and labeled `Display` output
//! - **Catalog** - [`OrderCatalog`], the synchronous store: add, remove, replace,
//!   sort, and the filter-then-sort-by-total queries ([`OrderQuery`])
//! - **Service** - [`CatalogService`] owns one catalog and processes
//!   [`CatalogRequest`]s one at a time, which is the exclusive lock every
//!   operation needs under concurrency
//! - **Client** - [`CatalogClient`], a cloneable handle with one async method per
//!   operation; validates orders before they are sent
//! - **System** - [`CatalogSystem`] for startup and graceful shutdown,
//!   [`CatalogConfig`] and [`setup_tracing`] for the ambient setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use rust_decimal::Decimal;
//! # use order_catalog::*;
//! # async fn demo() -> Result<(), CatalogError> {
//! let system = CatalogSystem::new(&CatalogConfig::default());
//! let client = system.catalog_client.clone();
//!
//! let phone = Arc::new(Product::new(1, "Phone", Decimal::from(600)));
//! let bob = Arc::new(Customer::new(1, "Bob"));
//! client.add_order(Order::new(2, bob, vec![OrderDetail::new(phone, 1)])).await?;
//!
//! let big_orders = client.query_by_min_total(Decimal::from(500)).await?;
//! assert_eq!(big_orders.len(), 1);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actors;
pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;
pub mod messages;

#[cfg(test)]
mod mock_framework;

pub use actors::CatalogService;
pub use app_system::{setup_tracing, CatalogConfig, CatalogSystem, RejectedSetting};
pub use catalog::{OrderCatalog, OrderQuery};
pub use clients::CatalogClient;
pub use domain::*;
pub use error::{CatalogError, ValidationError};
pub use messages::{CatalogRequest, OrderComparator};
