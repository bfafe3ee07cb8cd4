//! Actor that owns the catalog and serves requests one at a time.

mod catalog_service;

pub use catalog_service::CatalogService;
