//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `CATALOG_*` environment variables, command-line flags or a
//! configuration file, layered by `ortho_config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{CatalogReadConfig, PoolConfig};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Runtime settings for the catalog service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct CatalogSettings {
    /// PostgreSQL connection URL of the inventory database.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// Maximum pooled connections; zero selects the default.
    #[ortho_config(default = 10)]
    pub pool_size: u32,
    /// Warehouse whose stock makes a product listable.
    #[ortho_config(default = 8)]
    pub stock_location_id: i64,
    /// Customer delivery location used to rank best sellers.
    #[ortho_config(default = 5)]
    pub customer_location_id: i64,
    /// Upper bound for each catalog read, in milliseconds.
    #[ortho_config(default = 10_000)]
    pub query_timeout_ms: u64,
}

/// Raised when required settings are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("CATALOG_DATABASE_URL is not set")]
    MissingDatabaseUrl,
}

impl CatalogSettings {
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    pub fn pool_size(&self) -> u32 {
        if self.pool_size == 0 {
            DEFAULT_POOL_SIZE
        } else {
            self.pool_size
        }
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// Pool settings derived from the database URL and pool size.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?).with_max_size(self.pool_size()))
    }

    /// Locations and timeout for catalog reads.
    pub fn read_config(&self) -> CatalogReadConfig {
        CatalogReadConfig {
            stock_location_id: self.stock_location_id,
            customer_location_id: self.customer_location_id,
            timeout: self.query_timeout(),
        }
    }
}
