//! Concurrent execution of paired catalog queries.
//!
//! A filtered page needs two statements: the paginated data query and the
//! filter-wide count. The data query runs on a spawned task while the count
//! runs on the calling task; the two meet at [`DataTask::join`]. A failed or
//! empty count returns immediately and leaves the data task to finish on its
//! own, unbounded by the timeout. Otherwise the whole fetch is bounded by the
//! configured timeout, and dropping it (timeout or caller cancellation)
//! aborts the still-attached data task.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::catalog::{
    CatalogPage, ProductRecord, decode_category_path, decode_locale_text,
};
use crate::domain::ports::{CatalogRepositoryError, StatementKind};

use super::models::ProductRow;
use super::query_builder::{CatalogQuery, SqlStatement};
use super::sql_reader::{SqlReadError, SqlReader};

type DataOutcome = Result<Vec<ProductRow>, SqlReadError>;

/// Handle to the in-flight data query.
///
/// Dropping the guard aborts the task unless it has been detached or joined.
struct DataTask {
    handle: Option<JoinHandle<DataOutcome>>,
}

impl DataTask {
    fn spawn<R: SqlReader>(reader: Arc<R>, statement: SqlStatement) -> Self {
        let handle = tokio::spawn(async move { reader.load_products(statement).await });
        Self {
            handle: Some(handle),
        }
    }

    /// Let the task run to completion with nobody waiting for its result.
    fn detach(mut self) {
        self.handle.take();
    }

    async fn join(mut self) -> Result<Vec<ProductRow>, CatalogRepositoryError> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(CatalogRepositoryError::query(
                StatementKind::Data,
                "data task already released",
            ));
        };
        // Awaiting through the guard keeps abort-on-drop armed while pending.
        let outcome = handle.await;
        self.handle = None;
        match outcome {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(err)) => Err(err.into_repository_error(StatementKind::Data)),
            Err(join_error) => Err(CatalogRepositoryError::query(
                StatementKind::Data,
                join_error.to_string(),
            )),
        }
    }
}

impl Drop for DataTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Runs catalog statements and normalises their rows.
pub struct CatalogExecutor<R> {
    reader: Arc<R>,
    timeout: Duration,
}

impl<R> Clone for CatalogExecutor<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            timeout: self.timeout,
        }
    }
}

impl<R: SqlReader> CatalogExecutor<R> {
    pub fn new(reader: Arc<R>, timeout: Duration) -> Self {
        Self { reader, timeout }
    }

    /// Run the data and count queries of `query` concurrently.
    ///
    /// Returns [`CatalogRepositoryError::NotFound`] when the count is zero.
    /// Records come back in row order with empty image lists.
    pub async fn fetch(&self, query: CatalogQuery) -> Result<CatalogPage, CatalogRepositoryError> {
        self.with_deadline(self.fetch_page(query)).await
    }

    /// Run a single product statement and normalise every row.
    pub async fn fetch_rows(
        &self,
        statement: SqlStatement,
        kind: StatementKind,
    ) -> Result<Vec<ProductRecord>, CatalogRepositoryError> {
        self.with_deadline(async {
            let rows = self
                .reader
                .load_products(statement)
                .await
                .map_err(|err| err.into_repository_error(kind))?;
            rows.into_iter().map(|row| normalize_row(row, kind)).collect()
        })
        .await
    }

    /// Bound `work` by the configured timeout.
    pub async fn with_deadline<T, F>(&self, work: F) -> Result<T, CatalogRepositoryError>
    where
        F: Future<Output = Result<T, CatalogRepositoryError>>,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let timeout_ms = self.timeout_ms();
                warn!(timeout_ms, "catalog read timed out");
                Err(CatalogRepositoryError::timeout(timeout_ms))
            }
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    async fn fetch_page(&self, query: CatalogQuery) -> Result<CatalogPage, CatalogRepositoryError> {
        let data = DataTask::spawn(Arc::clone(&self.reader), query.data_statement());

        let total = match self.reader.load_count(query.count_statement()).await {
            Ok(total) => total,
            Err(err) => {
                data.detach();
                return Err(err.into_repository_error(StatementKind::Count));
            }
        };
        let total = u64::try_from(total).map_err(|_| {
            CatalogRepositoryError::query(StatementKind::Count, format!("negative count {total}"))
        })?;
        if total == 0 {
            data.detach();
            return Err(CatalogRepositoryError::not_found());
        }

        let rows = data.join().await?;
        debug!(total, rows = rows.len(), "catalog page fetched");
        let records = rows
            .into_iter()
            .map(|row| normalize_row(row, StatementKind::Data))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CatalogPage { records, total })
    }
}

/// Turn a raw product row into a [`ProductRecord`].
///
/// A name that cannot be decoded becomes an empty string; the rest of the
/// row is kept.
fn normalize_row(row: ProductRow, kind: StatementKind) -> Result<ProductRecord, CatalogRepositoryError> {
    let ProductRow {
        id,
        name,
        category,
        price,
        stock,
    } = row;
    let id = u64::try_from(id)
        .map_err(|_| CatalogRepositoryError::query(kind, format!("negative product id {id}")))?;

    let name = decode_locale_text(name.as_deref().unwrap_or_default()).unwrap_or_else(|err| {
        warn!(product_id = id, error = %err, "product name could not be decoded");
        String::new()
    });
    let category_full_path = category.unwrap_or_default();

    Ok(ProductRecord {
        id,
        name,
        price: price.unwrap_or_default(),
        category: decode_category_path(&category_full_path),
        category_full_path,
        stock: stock.unwrap_or_default(),
        images: Vec::new(),
    })
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
