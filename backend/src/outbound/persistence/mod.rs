//! PostgreSQL persistence adapters for catalog reads.
//!
//! Statements are built by [`CatalogQueryBuilder`] as SQL text plus
//! positional parameters, run through a [`SqlReader`] and normalised into
//! domain read models:
//!
//! - **query_builder**: pure SQL construction for pages, single products and
//!   the best-selling ranking.
//! - **executor**: concurrent count and data queries with a timeout.
//! - **image_enricher**: batch attachment lookup and data-URI encoding.
//! - **category_catalog**: leaf category listing.
//! - **diesel_sql_reader** / **pool**: the `diesel-async` + `bb8` backend.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use catalog_backend::outbound::persistence::{
//!     CatalogReadConfig, DbPool, DieselSqlReader, PoolConfig, SqlProductCatalogRepository,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/inventory")).await?;
//! let reader = Arc::new(DieselSqlReader::new(pool));
//! let repo = SqlProductCatalogRepository::new(reader, CatalogReadConfig::default());
//! ```

mod category_catalog;
mod diesel_sql_reader;
mod executor;
mod image_enricher;
mod models;
mod pool;
mod query_builder;
mod sql_catalog_repository;
mod sql_reader;
#[cfg(test)]
pub(crate) mod test_support;

pub use category_catalog::CategoryCatalog;
pub use diesel_sql_reader::DieselSqlReader;
pub use executor::CatalogExecutor;
pub use image_enricher::{ImageEnricher, data_uri};
pub use models::{CategoryNameRow, CountRow, ImageRow, ProductRow};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use query_builder::{CatalogQuery, CatalogQueryBuilder, SqlParam, SqlStatement};
pub use sql_catalog_repository::{CatalogReadConfig, SqlProductCatalogRepository};
pub use sql_reader::{SqlReadError, SqlReader};
