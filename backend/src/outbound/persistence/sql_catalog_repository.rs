//! SQL-backed implementation of the product catalog port.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::catalog::{CatalogPage, CategoryEntry, FilterSpec, ProductRecord};
use crate::domain::ports::{CatalogRepositoryError, ProductCatalogRepository, StatementKind};

use super::category_catalog::CategoryCatalog;
use super::executor::CatalogExecutor;
use super::image_enricher::ImageEnricher;
use super::query_builder::CatalogQueryBuilder;
use super::sql_reader::SqlReader;

/// Inventory locations and time budget for catalog reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogReadConfig {
    /// Warehouse whose positive stock makes a product listable.
    pub stock_location_id: i64,
    /// Destination of customer deliveries, used for the best-selling ranking.
    pub customer_location_id: i64,
    /// Upper bound for each read stage.
    pub timeout: Duration,
}

impl Default for CatalogReadConfig {
    fn default() -> Self {
        Self {
            stock_location_id: 8,
            customer_location_id: 5,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Catalog repository composed of the query builder, executor, image
/// enricher and category catalog over one [`SqlReader`].
pub struct SqlProductCatalogRepository<R> {
    builder: CatalogQueryBuilder,
    executor: CatalogExecutor<R>,
    images: ImageEnricher<R>,
    categories: CategoryCatalog<R>,
}

impl<R: SqlReader> SqlProductCatalogRepository<R> {
    /// # Examples
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new(url)).await?;
    /// let reader = Arc::new(DieselSqlReader::new(pool));
    /// let repo = SqlProductCatalogRepository::new(reader, CatalogReadConfig::default());
    /// ```
    pub fn new(reader: Arc<R>, config: CatalogReadConfig) -> Self {
        Self {
            builder: CatalogQueryBuilder::new(
                config.stock_location_id,
                config.customer_location_id,
            ),
            executor: CatalogExecutor::new(Arc::clone(&reader), config.timeout),
            images: ImageEnricher::new(Arc::clone(&reader)),
            categories: CategoryCatalog::new(reader),
        }
    }

    async fn enrich(&self, records: &mut [ProductRecord]) -> Result<(), CatalogRepositoryError> {
        self.executor
            .with_deadline(self.images.enrich(records))
            .await
    }
}

#[async_trait]
impl<R: SqlReader> ProductCatalogRepository for SqlProductCatalogRepository<R> {
    #[instrument(skip(self))]
    async fn fetch_page(&self, filter: &FilterSpec) -> Result<CatalogPage, CatalogRepositoryError> {
        let mut page = self.executor.fetch(self.builder.build(filter)).await?;
        self.enrich(&mut page.records).await?;
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn find_product(&self, id: u64) -> Result<Option<ProductRecord>, CatalogRepositoryError> {
        let id = i64::try_from(id).map_err(|_| {
            CatalogRepositoryError::query(StatementKind::Product, format!("id {id} out of range"))
        })?;
        let mut records = self
            .executor
            .fetch_rows(self.builder.product_by_id(id), StatementKind::Product)
            .await?;
        records.truncate(1);
        self.enrich(&mut records).await?;
        Ok(records.pop())
    }

    #[instrument(skip(self))]
    async fn best_selling(
        &self,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, CatalogRepositoryError> {
        let mut records = self
            .executor
            .fetch_rows(self.builder.best_selling(limit), StatementKind::BestSelling)
            .await?;
        self.enrich(&mut records).await?;
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CatalogRepositoryError> {
        self.executor
            .with_deadline(self.categories.list_categories())
            .await
    }
}
