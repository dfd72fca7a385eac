//! Driving port for catalog reads.
//!
//! Inbound adapters hand over raw pagination values and filter inputs;
//! implementations validate them before any I/O happens.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::catalog::{CatalogPage, CategoryEntry, OrderDirection, ProductRecord};

/// Raw pagination as received from a caller. `None` selects the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Inputs for a filtered product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilterRequest {
    pub categories: Vec<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub name: Option<String>,
    pub order: OrderDirection,
    pub page: PageParams,
}

/// Inputs for a related-products listing: same category, similar name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedProductsRequest {
    pub category: String,
    pub name: String,
    pub page: PageParams,
}

/// Use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogQuery: Send + Sync {
    /// Unfiltered listing.
    async fn list_products(&self, page: PageParams) -> Result<CatalogPage, Error>;

    /// Listing restricted by categories, price range and name.
    async fn filter_products(&self, request: ProductFilterRequest) -> Result<CatalogPage, Error>;

    /// Products sharing a category with, and named like, a reference product.
    async fn related_products(&self, request: RelatedProductsRequest)
    -> Result<CatalogPage, Error>;

    /// One product by identifier.
    async fn product(&self, id: i64) -> Result<ProductRecord, Error>;

    /// Top sellers; `None` selects the default limit.
    async fn best_selling(&self, limit: Option<i64>) -> Result<Vec<ProductRecord>, Error>;

    /// Leaf categories for filter population.
    async fn categories(&self) -> Result<Vec<CategoryEntry>, Error>;
}

/// Fixture implementation backed by an empty catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCatalogQuery;

#[async_trait]
impl ProductCatalogQuery for FixtureProductCatalogQuery {
    async fn list_products(&self, _page: PageParams) -> Result<CatalogPage, Error> {
        Err(Error::not_found("no products found"))
    }

    async fn filter_products(&self, _request: ProductFilterRequest) -> Result<CatalogPage, Error> {
        Err(Error::not_found("no products found"))
    }

    async fn related_products(
        &self,
        _request: RelatedProductsRequest,
    ) -> Result<CatalogPage, Error> {
        Err(Error::not_found("no products found"))
    }

    async fn product(&self, id: i64) -> Result<ProductRecord, Error> {
        Err(Error::not_found(format!("product {id} not found")))
    }

    async fn best_selling(&self, _limit: Option<i64>) -> Result<Vec<ProductRecord>, Error> {
        Ok(Vec::new())
    }

    async fn categories(&self) -> Result<Vec<CategoryEntry>, Error> {
        Ok(Vec::new())
    }
}
