//! Diesel-backed [`SqlReader`].
//!
//! Catalog statements are only known at runtime, so they go through
//! `sql_query` with positional binds rather than the typed query DSL.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Array, BigInt, Text};
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::{CategoryNameRow, CountRow, ImageRow, ProductRow};
use super::pool::{DbPool, PoolError};
use super::query_builder::{SqlParam, SqlStatement};
use super::sql_reader::{SqlReadError, SqlReader};

/// Runs catalog statements on pooled connections.
#[derive(Clone)]
pub struct DieselSqlReader {
    pool: DbPool,
}

impl DieselSqlReader {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SqlReadError {
    SqlReadError::Connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> SqlReadError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let message = error.to_string();
    debug!(%message, "catalog statement failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SqlReadError::Connection(message)
        }
        _ => SqlReadError::Query(message),
    }
}

/// Attach every parameter to the statement text, in placeholder order.
fn bind_statement(statement: SqlStatement) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    let (sql, params) = statement.into_parts();
    debug!(%sql, params = params.len(), "running catalog statement");
    params
        .into_iter()
        .fold(diesel::sql_query(sql).into_boxed::<Pg>(), |query, param| {
            match param {
                SqlParam::Text(value) => query.bind::<Text, _>(value),
                SqlParam::BigInt(value) => query.bind::<BigInt, _>(value),
                SqlParam::BigIntArray(values) => query.bind::<Array<BigInt>, _>(values),
            }
        })
}

#[async_trait]
impl SqlReader for DieselSqlReader {
    async fn load_count(&self, statement: SqlStatement) -> Result<i64, SqlReadError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CountRow = bind_statement(statement)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.total)
    }

    async fn load_products(
        &self,
        statement: SqlStatement,
    ) -> Result<Vec<ProductRow>, SqlReadError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        bind_statement(statement)
            .load::<ProductRow>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn load_images(&self, statement: SqlStatement) -> Result<Vec<ImageRow>, SqlReadError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        bind_statement(statement)
            .load::<ImageRow>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn load_category_names(
        &self,
        statement: SqlStatement,
    ) -> Result<Vec<CategoryNameRow>, SqlReadError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        bind_statement(statement)
            .load::<CategoryNameRow>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
