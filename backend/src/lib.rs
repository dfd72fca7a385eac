//! Product catalog backend library.
//!
//! - [`domain`]: read models, normalisation rules, ports and the catalog
//!   service.
//! - [`inbound`]: Actix HTTP handlers.
//! - [`outbound`]: PostgreSQL adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
