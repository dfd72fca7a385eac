//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use catalog_backend::domain::ports::ProductCatalogQuery;

/// Everything the HTTP server needs once the catalog has been wired.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) catalog: Arc<dyn ProductCatalogQuery>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, catalog: Arc<dyn ProductCatalogQuery>) -> Self {
        Self { bind_addr, catalog }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
