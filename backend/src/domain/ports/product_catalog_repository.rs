//! Read-side port for product catalog queries.
//!
//! The port hides the inventory schema and the SQL used to read it. Domain
//! services ask for pages, single products and category listings and get
//! back normalised read models.

use std::fmt;

use async_trait::async_trait;

use crate::domain::catalog::{CatalogPage, CategoryEntry, FilterSpec, ProductRecord};

use super::define_port_error;

/// Which statement of a catalog read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Filter-wide `COUNT(*)`.
    Count,
    /// Paginated product rows.
    Data,
    /// Batch attachment lookup.
    Images,
    /// Category name listing.
    Categories,
    /// Single product lookup.
    Product,
    /// Best-selling ranking.
    BestSelling,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Count => "count",
            Self::Data => "data",
            Self::Images => "images",
            Self::Categories => "categories",
            Self::Product => "product",
            Self::BestSelling => "best_selling",
        };
        f.write_str(label)
    }
}

define_port_error! {
    /// Errors raised when reading the product catalog.
    pub enum CatalogRepositoryError {
        /// A pooled connection could not be obtained.
        Connection { message: String } =>
            "catalog read connection failed: {message}",
        /// A statement failed during execution or row conversion.
        Query { statement: StatementKind, message: String } =>
            "catalog {statement} query failed: {message}",
        /// The read did not finish within the configured budget.
        Timeout { timeout_ms: u64 } =>
            "catalog read exceeded {timeout_ms} ms",
        /// The filter matched no products.
        NotFound =>
            "no products matched the filter",
    }
}

/// Port for reading the product catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogRepository: Send + Sync {
    /// Return one filtered page plus the filter-wide total.
    ///
    /// A filter matching nothing yields [`CatalogRepositoryError::NotFound`]
    /// rather than an empty page.
    async fn fetch_page(&self, filter: &FilterSpec) -> Result<CatalogPage, CatalogRepositoryError>;

    /// Look up one in-stock product by identifier.
    async fn find_product(&self, id: u64) -> Result<Option<ProductRecord>, CatalogRepositoryError>;

    /// Return up to `limit` in-stock products ranked by delivered quantity.
    async fn best_selling(&self, limit: u32)
    -> Result<Vec<ProductRecord>, CatalogRepositoryError>;

    /// List leaf categories for filter population.
    async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CatalogRepositoryError>;
}

/// Fixture implementation for tests that do not exercise catalog reads.
///
/// Behaves like an empty catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCatalogRepository;

#[async_trait]
impl ProductCatalogRepository for FixtureProductCatalogRepository {
    async fn fetch_page(&self, _filter: &FilterSpec) -> Result<CatalogPage, CatalogRepositoryError> {
        Err(CatalogRepositoryError::not_found())
    }

    async fn find_product(&self, _id: u64) -> Result<Option<ProductRecord>, CatalogRepositoryError> {
        Ok(None)
    }

    async fn best_selling(
        &self,
        _limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CatalogRepositoryError> {
        Ok(Vec::new())
    }
}
