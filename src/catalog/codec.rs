//! JSON snapshot export and merge-import.

use std::collections::HashSet;

use super::OrderCatalog;
use crate::domain::Order;
use crate::error::CatalogError;

impl OrderCatalog {
    /// Serializes the current snapshot as a JSON array of orders.
    pub fn export_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.orders)?)
    }

    /// Adds every order from a JSON array whose id is not already present.
    ///
    /// The batch is parsed and validated in full before anything is inserted;
    /// on error the catalog is untouched. Ids that already exist are skipped,
    /// as are repeats of an id earlier in the same batch. Returns how many
    /// orders were added.
    pub fn import_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let incoming: Vec<Order> = serde_json::from_str(json)?;
        for order in &incoming {
            order.validate()?;
        }

        let mut seen = HashSet::new();
        let fresh: Vec<Order> = incoming
            .into_iter()
            .filter(|order| !self.contains(order.order_id) && seen.insert(order.order_id))
            .collect();

        let imported = fresh.len();
        for order in fresh {
            self.add(order)?;
        }
        Ok(imported)
    }
}
