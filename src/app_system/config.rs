use std::env;

use tracing::warn;

pub const BUFFER_SIZE_VAR: &str = "ORDER_CATALOG_BUFFER_SIZE";
pub const LOG_FILTER_VAR: &str = "ORDER_CATALOG_LOG";

/// Runtime settings for the catalog system.
///
/// `log_filter` is only the fallback; a `RUST_LOG` value always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Capacity of the request channel in front of the catalog service.
    pub buffer_size: usize,
    pub log_filter: String,
    /// Settings that were present but unusable, kept so they can be reported
    /// once tracing is installed.
    pub rejected: Vec<RejectedSetting>,
}

/// An environment value that was ignored in favour of the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSetting {
    pub var: &'static str,
    pub value: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            buffer_size: 100,
            log_filter: "info".to_string(),
            rejected: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Reads `ORDER_CATALOG_BUFFER_SIZE` and `ORDER_CATALOG_LOG`, keeping the
    /// default for anything unset or unusable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BUFFER_SIZE_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.buffer_size = size,
                _ => config.rejected.push(RejectedSetting {
                    var: BUFFER_SIZE_VAR,
                    value: raw,
                }),
            }
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }

    /// Emits a `warn!` for every ignored setting. Call after `setup_tracing`,
    /// since reading the config happens before a subscriber exists.
    pub fn log_rejected(&self) {
        for setting in &self.rejected {
            warn!(
                value = %setting.value,
                buffer_size = self.buffer_size,
                "Ignoring invalid {}", setting.var
            );
        }
    }
}
