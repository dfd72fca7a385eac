//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving port, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::ProductCatalogQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalog: Arc<dyn ProductCatalogQuery>,
}

impl HttpState {
    pub fn new(catalog: Arc<dyn ProductCatalogQuery>) -> Self {
        Self { catalog }
    }
}
