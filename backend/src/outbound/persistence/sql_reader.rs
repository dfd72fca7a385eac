//! Statement execution seam for catalog reads.
//!
//! The executor, image enricher and category catalog only need "run this
//! statement and give me typed rows". [`SqlReader`] captures exactly that so
//! they can be exercised without a database.

use async_trait::async_trait;

use crate::domain::ports::{CatalogRepositoryError, StatementKind};

use super::models::{CategoryNameRow, ImageRow, ProductRow};
use super::query_builder::SqlStatement;

/// Failure while running one statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlReadError {
    /// No connection could be checked out.
    #[error("connection unavailable: {0}")]
    Connection(String),
    /// The statement failed or its rows could not be decoded.
    #[error("{0}")]
    Query(String),
}

impl SqlReadError {
    /// Attribute the failure to the statement that raised it.
    pub fn into_repository_error(self, statement: StatementKind) -> CatalogRepositoryError {
        match self {
            Self::Connection(message) => CatalogRepositoryError::connection(message),
            Self::Query(message) => CatalogRepositoryError::query(statement, message),
        }
    }
}

/// Runs catalog statements and returns typed rows.
#[async_trait]
pub trait SqlReader: Send + Sync + 'static {
    /// Run a `COUNT(*) AS total` statement.
    async fn load_count(&self, statement: SqlStatement) -> Result<i64, SqlReadError>;

    async fn load_products(&self, statement: SqlStatement)
    -> Result<Vec<ProductRow>, SqlReadError>;

    async fn load_images(&self, statement: SqlStatement) -> Result<Vec<ImageRow>, SqlReadError>;

    async fn load_category_names(
        &self,
        statement: SqlStatement,
    ) -> Result<Vec<CategoryNameRow>, SqlReadError>;
}
