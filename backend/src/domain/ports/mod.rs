//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod product_catalog_query;
mod product_catalog_repository;

#[cfg(test)]
pub use product_catalog_query::MockProductCatalogQuery;
pub use product_catalog_query::{
    FixtureProductCatalogQuery, PageParams, ProductCatalogQuery, ProductFilterRequest,
    RelatedProductsRequest,
};
#[cfg(test)]
pub use product_catalog_repository::MockProductCatalogRepository;
pub use product_catalog_repository::{
    CatalogRepositoryError, FixtureProductCatalogRepository, ProductCatalogRepository,
    StatementKind,
};
