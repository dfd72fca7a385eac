//! Read models returned by catalog queries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product with denormalised name, category and inline images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[schema(example = 42)]
    pub id: u64,
    #[schema(example = "Champú")]
    pub name: String,
    #[schema(example = 20.0)]
    pub price: f64,
    /// Leaf segment of the category path.
    #[schema(example = "Hair Care")]
    pub category: String,
    /// Full category path as stored.
    #[serde(rename = "categoryName")]
    #[schema(example = "All / Beauty / Hair Care")]
    pub category_full_path: String,
    #[schema(example = 12.0)]
    pub stock: f64,
    /// Attached images as `data:<mime>;base64,<payload>` URIs, in storage order.
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of filtered products plus the filter-wide match count.
///
/// `total` ignores pagination; `records` keeps database row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogPage {
    #[serde(rename = "products")]
    pub records: Vec<ProductRecord>,
    #[schema(example = 1)]
    pub total: u64,
}

/// A category offered for filter population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    /// Leaf name, unique across a listing.
    #[schema(example = "Shampoo")]
    pub category: String,
    /// Full path as stored.
    #[schema(example = "All / Beauty / Hair / Shampoo")]
    pub category_name: String,
}
