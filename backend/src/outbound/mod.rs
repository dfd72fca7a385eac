//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed catalog reads via `diesel-async`.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod persistence;
