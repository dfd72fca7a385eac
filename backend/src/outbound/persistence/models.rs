//! Internal Diesel row structs for catalog reads.
//!
//! Catalog statements are assembled at runtime, so rows are mapped by column
//! name with `QueryableByName` rather than through a `table!` schema. Legacy
//! columns are nullable in the inventory schema and are kept nullable here;
//! normalisation decides what a missing value means.

use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Binary, Double, Nullable, Text};

/// One product row from the data, single-product and best-selling queries.
#[derive(Debug, Clone, PartialEq, QueryableByName)]
pub struct ProductRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    /// Locale-keyed name literal.
    #[diesel(sql_type = Nullable<Text>)]
    pub name: Option<String>,
    /// Raw category path; absent when the product has no category.
    #[diesel(sql_type = Nullable<Text>)]
    pub category: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub price: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub stock: Option<f64>,
}

/// Result of a `COUNT(*) AS total` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

/// One stored attachment.
#[derive(Debug, Clone, PartialEq, Eq, QueryableByName)]
pub struct ImageRow {
    #[diesel(sql_type = BigInt)]
    pub res_id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub mimetype: Option<String>,
    #[diesel(sql_type = Binary)]
    pub db_datas: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, QueryableByName)]
pub struct CategoryNameRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub name: Option<String>,
}
