//! Catalog read service.
//!
//! Implements the [`ProductCatalogQuery`] driving port: validates raw
//! pagination and identifiers, builds the [`FilterSpec`] for each use-case and
//! maps repository failures onto domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, instrument};

use crate::domain::Error;
use crate::domain::catalog::{
    CatalogPage, CatalogValidationError, CategoryEntry, DEFAULT_BEST_SELLING_LIMIT,
    DEFAULT_PAGE_SIZE, DEFAULT_RELATED_PAGE_SIZE, FilterSpec, PageRequest, ProductRecord,
};
use crate::domain::ports::{
    CatalogRepositoryError, PageParams, ProductCatalogQuery, ProductCatalogRepository,
    ProductFilterRequest, RelatedProductsRequest,
};

const NO_PRODUCTS_FOUND: &str = "no products found";

/// Catalog service implementing the driving port.
#[derive(Clone)]
pub struct CatalogService<R> {
    repository: Arc<R>,
}

impl<R> CatalogService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CatalogService<R>
where
    R: ProductCatalogRepository,
{
    fn map_repository_error(error: CatalogRepositoryError) -> Error {
        match error {
            CatalogRepositoryError::NotFound => Error::not_found(NO_PRODUCTS_FOUND),
            CatalogRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("catalog unavailable: {message}"))
            }
            CatalogRepositoryError::Timeout { timeout_ms } => {
                Error::service_unavailable(format!("catalog read timed out after {timeout_ms} ms"))
            }
            err @ CatalogRepositoryError::Query { .. } => {
                error!(error = %err, "catalog query failed");
                Error::internal(err.to_string())
            }
        }
    }

    fn map_validation_error(error: CatalogValidationError) -> Error {
        Error::invalid_request(error.to_string())
    }

    fn page_request(params: PageParams, default_size: u32) -> Result<PageRequest, Error> {
        PageRequest::new(params.page, params.page_size, default_size)
            .map_err(Self::map_validation_error)
    }

    async fn fetch(&self, filter: FilterSpec) -> Result<CatalogPage, Error> {
        self.repository
            .fetch_page(&filter)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> ProductCatalogQuery for CatalogService<R>
where
    R: ProductCatalogRepository,
{
    #[instrument(skip(self))]
    async fn list_products(&self, page: PageParams) -> Result<CatalogPage, Error> {
        let page = Self::page_request(page, DEFAULT_PAGE_SIZE)?;
        self.fetch(FilterSpec::new(page)).await
    }

    #[instrument(skip(self))]
    async fn filter_products(&self, request: ProductFilterRequest) -> Result<CatalogPage, Error> {
        let ProductFilterRequest {
            categories,
            min_price,
            max_price,
            name,
            order,
            page,
        } = request;
        let page = Self::page_request(page, DEFAULT_PAGE_SIZE)?;
        let filter = FilterSpec::new(page)
            .with_categories(categories)
            .with_price_bounds(min_price, max_price)
            .with_name(name)
            .with_order(order);
        self.fetch(filter).await
    }

    #[instrument(skip(self))]
    async fn related_products(
        &self,
        request: RelatedProductsRequest,
    ) -> Result<CatalogPage, Error> {
        let RelatedProductsRequest {
            category,
            name,
            page,
        } = request;
        let page = Self::page_request(page, DEFAULT_RELATED_PAGE_SIZE)?;
        let filter = FilterSpec::new(page)
            .with_categories([category])
            .with_name(Some(name));
        self.fetch(filter).await
    }

    #[instrument(skip(self))]
    async fn product(&self, id: i64) -> Result<ProductRecord, Error> {
        let product_id = u64::try_from(id)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(CatalogValidationError::ProductIdOutOfRange(id))
            .map_err(Self::map_validation_error)?;
        self.repository
            .find_product(product_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))
    }

    #[instrument(skip(self))]
    async fn best_selling(&self, limit: Option<i64>) -> Result<Vec<ProductRecord>, Error> {
        // Non-positive limits fall back to the default rather than failing.
        let limit = limit
            .and_then(|value| u32::try_from(value).ok())
            .filter(|value| *value >= 1)
            .unwrap_or(DEFAULT_BEST_SELLING_LIMIT);
        self.repository
            .best_selling(limit)
            .await
            .map_err(Self::map_repository_error)
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<CategoryEntry>, Error> {
        self.repository
            .list_categories()
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
