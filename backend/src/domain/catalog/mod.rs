//! Product catalog domain types.
//!
//! Purpose: describe what a catalog read asks for ([`FilterSpec`],
//! [`PageRequest`]) and what it returns ([`CatalogPage`], [`ProductRecord`],
//! [`CategoryEntry`]), plus the pure normalisation rules applied to the
//! legacy text columns those records are built from.

mod filter;
mod locale_text;
mod product;

pub use filter::{
    CatalogValidationError, DEFAULT_BEST_SELLING_LIMIT, DEFAULT_PAGE_SIZE,
    DEFAULT_RELATED_PAGE_SIZE, FilterSpec, OrderDirection, PageRequest,
};
pub use locale_text::{
    DecodeError, PATH_DELIMITER, decode_category_path, decode_locale_text,
    is_listed_category_path,
};
pub use product::{CatalogPage, CategoryEntry, ProductRecord};
