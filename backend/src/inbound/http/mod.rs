//! HTTP inbound adapter exposing the catalog REST endpoints.

pub mod error;
pub mod health;
pub mod products;
pub mod state;

pub use error::ApiResult;
