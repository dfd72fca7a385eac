//! Scripted [`SqlReader`] used by the persistence unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::models::{CategoryNameRow, ImageRow, ProductRow};
use super::query_builder::SqlStatement;
use super::sql_reader::{SqlReadError, SqlReader};

/// Which reader method recorded a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Count,
    Products,
    Images,
    CategoryNames,
}

/// Reader returning canned results after optional delays.
#[derive(Debug)]
pub(crate) struct ScriptedReader {
    count: Result<i64, SqlReadError>,
    count_delay: Duration,
    products: Result<Vec<ProductRow>, SqlReadError>,
    products_delay: Duration,
    products_panic: bool,
    images: Result<Vec<ImageRow>, SqlReadError>,
    category_names: Result<Vec<CategoryNameRow>, SqlReadError>,
    calls: Mutex<Vec<(Call, SqlStatement)>>,
    products_finished: AtomicBool,
}

impl Default for ScriptedReader {
    fn default() -> Self {
        Self {
            count: Ok(0),
            count_delay: Duration::ZERO,
            products: Ok(Vec::new()),
            products_delay: Duration::ZERO,
            products_panic: false,
            images: Ok(Vec::new()),
            category_names: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
            products_finished: AtomicBool::new(false),
        }
    }
}

impl ScriptedReader {
    pub(crate) fn with_count(mut self, count: Result<i64, SqlReadError>) -> Self {
        self.count = count;
        self
    }

    pub(crate) fn with_count_delay(mut self, delay: Duration) -> Self {
        self.count_delay = delay;
        self
    }

    pub(crate) fn with_products(mut self, products: Result<Vec<ProductRow>, SqlReadError>) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn with_products_delay(mut self, delay: Duration) -> Self {
        self.products_delay = delay;
        self
    }

    pub(crate) fn with_products_panic(mut self) -> Self {
        self.products_panic = true;
        self
    }

    pub(crate) fn with_images(mut self, images: Result<Vec<ImageRow>, SqlReadError>) -> Self {
        self.images = images;
        self
    }

    pub(crate) fn with_category_names(
        mut self,
        names: Result<Vec<CategoryNameRow>, SqlReadError>,
    ) -> Self {
        self.category_names = names;
        self
    }

    /// Statements received by `call`, in arrival order.
    pub(crate) fn statements(&self, call: Call) -> Vec<SqlStatement> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|(recorded, _)| *recorded == call)
            .map(|(_, statement)| statement.clone())
            .collect()
    }

    /// Whether a products load ran to completion.
    pub(crate) fn products_finished(&self) -> bool {
        self.products_finished.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call, statement: SqlStatement) {
        self.calls
            .lock()
            .expect("calls lock")
            .push((call, statement));
    }
}

pub(crate) fn product_row(id: i64, name: &str, category: &str, price: f64) -> ProductRow {
    ProductRow {
        id,
        name: Some(name.to_owned()),
        category: Some(category.to_owned()),
        price: Some(price),
        stock: Some(3.0),
    }
}

pub(crate) fn image_row(res_id: i64, mimetype: &str, payload: &[u8]) -> ImageRow {
    ImageRow {
        res_id,
        mimetype: Some(mimetype.to_owned()),
        db_datas: payload.to_vec(),
    }
}

pub(crate) fn category_row(name: &str) -> CategoryNameRow {
    CategoryNameRow {
        name: Some(name.to_owned()),
    }
}

#[async_trait]
impl SqlReader for ScriptedReader {
    async fn load_count(&self, statement: SqlStatement) -> Result<i64, SqlReadError> {
        self.record(Call::Count, statement);
        tokio::time::sleep(self.count_delay).await;
        self.count.clone()
    }

    async fn load_products(
        &self,
        statement: SqlStatement,
    ) -> Result<Vec<ProductRow>, SqlReadError> {
        self.record(Call::Products, statement);
        tokio::time::sleep(self.products_delay).await;
        assert!(!self.products_panic, "scripted products failure");
        self.products_finished.store(true, Ordering::SeqCst);
        self.products.clone()
    }

    async fn load_images(&self, statement: SqlStatement) -> Result<Vec<ImageRow>, SqlReadError> {
        self.record(Call::Images, statement);
        self.images.clone()
    }

    async fn load_category_names(
        &self,
        statement: SqlStatement,
    ) -> Result<Vec<CategoryNameRow>, SqlReadError> {
        self.record(Call::CategoryNames, statement);
        self.category_names.clone()
    }
}
