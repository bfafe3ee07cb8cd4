//! Catalog entities: plain data with identity and derived totals.

pub mod customer;
pub mod product;
pub mod order;

pub use customer::*;
pub use product::*;
pub use order::*;
