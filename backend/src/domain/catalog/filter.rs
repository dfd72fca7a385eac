//! Query intent for catalog reads: filters plus pagination.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default page size for plain and filtered product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Default page size for related-product lookups.
pub const DEFAULT_RELATED_PAGE_SIZE: u32 = 5;
/// Default number of best-selling products returned.
pub const DEFAULT_BEST_SELLING_LIMIT: u32 = 6;

/// Validation errors raised before any catalog query runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    #[error("page must be at least 1, got {0}")]
    PageOutOfRange(i64),
    #[error("page size must be at least 1, got {0}")]
    PageSizeOutOfRange(i64),
    #[error("product id must be at least 1, got {0}")]
    ProductIdOutOfRange(i64),
    #[error("requested page {page} with size {page_size} overflows the row offset")]
    OffsetOverflow { page: u32, page_size: u32 },
}

/// Price sort direction. Ordering only ever applies to price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl OrderDirection {
    /// Parse the `asc` / `desc` query value, case-insensitively.
    ///
    /// Anything else (including an absent value) means no ordering.
    ///
    /// # Examples
    /// ```
    /// use catalog_backend::domain::catalog::OrderDirection;
    ///
    /// assert_eq!(OrderDirection::from_query(Some("DESC")), OrderDirection::Descending);
    /// assert_eq!(OrderDirection::from_query(Some("price")), OrderDirection::None);
    /// ```
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => Self::Ascending,
            Some("desc") => Self::Descending,
            _ => Self::None,
        }
    }
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate a page request, applying `default_size` when no size was given.
    ///
    /// A missing page means the first page. Present values below 1 are
    /// rejected rather than silently corrected.
    ///
    /// # Examples
    /// ```
    /// use catalog_backend::domain::catalog::PageRequest;
    ///
    /// let page = PageRequest::new(Some(3), None, 20).expect("valid page");
    /// assert_eq!(page.offset(), 40);
    /// assert_eq!(page.limit(), 20);
    /// assert!(PageRequest::new(Some(0), None, 20).is_err());
    /// ```
    pub fn new(
        page: Option<i64>,
        page_size: Option<i64>,
        default_size: u32,
    ) -> Result<Self, CatalogValidationError> {
        let page = match page {
            None => 1,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|p| *p >= 1)
                .ok_or(CatalogValidationError::PageOutOfRange(value))?,
        };
        let page_size = match page_size {
            None => default_size.max(1),
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|s| *s >= 1)
                .ok_or(CatalogValidationError::PageSizeOutOfRange(value))?,
        };
        let request = Self { page, page_size };
        request.checked_offset()?;
        Ok(request)
    }

    /// The 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.page_size)
    }

    /// Maximum rows on this page.
    pub fn limit(&self) -> u32 {
        self.page_size
    }

    fn checked_offset(&self) -> Result<i64, CatalogValidationError> {
        i64::try_from(self.offset()).map_err(|_| CatalogValidationError::OffsetOverflow {
            page: self.page,
            page_size: self.page_size,
        })
    }
}

/// Immutable query intent for one filtered catalog page.
///
/// Built per request and discarded after the query runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    category_names: BTreeSet<String>,
    min_price: Option<i64>,
    max_price: Option<i64>,
    name_substring: Option<String>,
    order: OrderDirection,
    page: PageRequest,
}

impl FilterSpec {
    /// An unfiltered, unordered spec for the given page.
    pub fn new(page: PageRequest) -> Self {
        Self {
            category_names: BTreeSet::new(),
            min_price: None,
            max_price: None,
            name_substring: None,
            order: OrderDirection::None,
            page,
        }
    }

    /// Restrict results to categories whose name contains any of `names`.
    ///
    /// Blank names are dropped and duplicates collapse.
    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .collect();
        self
    }

    /// Set the price bounds. The range only applies when both are present.
    pub fn with_price_bounds(mut self, min_price: Option<i64>, max_price: Option<i64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    /// Restrict results to names containing `needle`; empty means no filter.
    pub fn with_name(mut self, needle: Option<String>) -> Self {
        self.name_substring = needle.filter(|value| !value.is_empty());
        self
    }

    /// Set the price sort direction.
    pub fn with_order(mut self, order: OrderDirection) -> Self {
        self.order = order;
        self
    }

    pub fn category_names(&self) -> &BTreeSet<String> {
        &self.category_names
    }

    /// The inclusive price range, present only when both bounds were given.
    pub fn price_range(&self) -> Option<(i64, i64)> {
        self.min_price.zip(self.max_price)
    }

    pub fn name_substring(&self) -> Option<&str> {
        self.name_substring.as_deref()
    }

    pub fn order(&self) -> OrderDirection {
        self.order
    }

    pub fn offset(&self) -> u64 {
        self.page.offset()
    }

    pub fn limit(&self) -> u32 {
        self.page.limit()
    }
}

#[cfg(test)]
mod tests {
    //! Validation and defaulting of query intent.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 20, 0)]
    #[case(Some(1), Some(5), 1, 5, 0)]
    #[case(Some(4), Some(10), 4, 10, 30)]
    fn page_request_computes_offset(
        #[case] page: Option<i64>,
        #[case] size: Option<i64>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
        #[case] expected_offset: u64,
    ) {
        let request = PageRequest::new(page, size, DEFAULT_PAGE_SIZE).expect("valid request");
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
        assert_eq!(request.offset(), expected_offset);
    }

    #[rstest]
    #[case(Some(0), None, CatalogValidationError::PageOutOfRange(0))]
    #[case(Some(-3), None, CatalogValidationError::PageOutOfRange(-3))]
    #[case(None, Some(0), CatalogValidationError::PageSizeOutOfRange(0))]
    fn page_request_rejects_out_of_range_values(
        #[case] page: Option<i64>,
        #[case] size: Option<i64>,
        #[case] expected: CatalogValidationError,
    ) {
        assert_eq!(PageRequest::new(page, size, DEFAULT_PAGE_SIZE), Err(expected));
    }

    #[rstest]
    fn price_range_requires_both_bounds() {
        let page = PageRequest::new(None, None, DEFAULT_PAGE_SIZE).expect("valid request");
        let min_only = FilterSpec::new(page).with_price_bounds(Some(15), None);
        let max_only = FilterSpec::new(page).with_price_bounds(None, Some(25));
        let both = FilterSpec::new(page).with_price_bounds(Some(15), Some(25));

        assert_eq!(min_only.price_range(), None);
        assert_eq!(max_only.price_range(), None);
        assert_eq!(both.price_range(), Some((15, 25)));
    }

    #[rstest]
    fn blank_filters_are_dropped() {
        let page = PageRequest::new(None, None, DEFAULT_PAGE_SIZE).expect("valid request");
        let spec = FilterSpec::new(page)
            .with_categories(["", "Hair", "Hair"])
            .with_name(Some(String::new()));

        assert_eq!(spec.category_names().len(), 1);
        assert_eq!(spec.name_substring(), None);
    }

    #[rstest]
    #[case(Some("asc"), OrderDirection::Ascending)]
    #[case(Some("Desc"), OrderDirection::Descending)]
    #[case(Some(""), OrderDirection::None)]
    #[case(None, OrderDirection::None)]
    fn order_direction_parses_query_values(
        #[case] raw: Option<&str>,
        #[case] expected: OrderDirection,
    ) {
        assert_eq!(OrderDirection::from_query(raw), expected);
    }
}
