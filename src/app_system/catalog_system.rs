use tracing::{error, info, instrument};

use super::CatalogConfig;
use crate::actors::CatalogService;
use crate::catalog::OrderCatalog;
use crate::clients::CatalogClient;
use crate::error::CatalogError;

/// Starts the catalog service, hands out its client, and shuts it down.
pub struct CatalogSystem {
    pub catalog_client: CatalogClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Create and start the catalog service with an empty catalog.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_catalog(config, OrderCatalog::new())
    }

    #[instrument(name = "catalog_system", skip(catalog), fields(seed_orders = catalog.len()))]
    pub fn with_catalog(config: &CatalogConfig, catalog: OrderCatalog) -> Self {
        info!("Starting catalog system");

        let (catalog_service, catalog_client) =
            CatalogService::with_catalog(config.buffer_size, catalog);
        let handles = vec![tokio::spawn(catalog_service.run())];

        info!("Catalog system started successfully");

        Self {
            catalog_client,
            handles,
        }
    }

    /// Gracefully shutdown the catalog service and wait for it to finish.
    ///
    /// Requests already queued ahead of the shutdown message are still served.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), CatalogError> {
        info!("Shutting down catalog system");

        self.catalog_client.shutdown().await?;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(CatalogError::ActorCommunication(format!(
                    "Service task failed: {}",
                    e
                )));
            }
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}
