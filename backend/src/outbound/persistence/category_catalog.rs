//! Leaf category listing for filter population.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::catalog::{CategoryEntry, decode_category_path, is_listed_category_path};
use crate::domain::ports::{CatalogRepositoryError, StatementKind};

use super::query_builder::SqlStatement;
use super::sql_reader::SqlReader;

const CATEGORY_NAMES_SQL: &str = "SELECT name::text AS name FROM product_category ORDER BY id";

/// Reads category paths and reduces them to unique leaves.
pub struct CategoryCatalog<R> {
    reader: Arc<R>,
}

impl<R: SqlReader> CategoryCatalog<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CatalogRepositoryError> {
        let rows = self
            .reader
            .load_category_names(SqlStatement::new(CATEGORY_NAMES_SQL, Vec::new()))
            .await
            .map_err(|err| err.into_repository_error(StatementKind::Categories))?;
        Ok(collect_categories(rows.into_iter().map(|row| row.name)))
    }
}

/// Keep listed paths, reduce them to leaves and drop repeated leaves.
///
/// The first path seen for a leaf wins.
fn collect_categories<I>(paths: I) -> Vec<CategoryEntry>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .flatten()
        .filter(|path| is_listed_category_path(path))
        .filter_map(|path| {
            let leaf = decode_category_path(&path);
            (!leaf.is_empty() && seen.insert(leaf.clone())).then(|| CategoryEntry {
                category: leaf,
                category_name: path,
            })
        })
        .collect()
}
