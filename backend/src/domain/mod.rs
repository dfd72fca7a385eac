//! Domain primitives, ports and services.
//!
//! Purpose: define the catalog read models and the use-cases over them,
//! independent of HTTP and of the SQL used to answer them.
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure payload.
//! - catalog — filters, pagination, read models and text normalisation.
//! - ports — driving and driven port traits.
//! - CatalogService — driving port implementation.

pub mod catalog;
pub mod catalog_service;
pub mod error;
pub mod ports;

pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode};
