//! SQL construction for catalog reads.
//!
//! Every filter is a [`Clause`] that renders its own `$n` placeholders and
//! pushes the matching values into one shared [`ParamList`] in the same
//! step, so placeholder numbering and parameter order cannot drift apart.
//! The data and count queries are rendered from the same clause list and
//! share one parameter vector; only the data query carries ordering and
//! pagination.

use crate::domain::catalog::{FilterSpec, OrderDirection};

/// Join of in-stock products at the reference location with their template
/// metadata. `$1` is always the stock location id.
const STOCKED_PRODUCTS_CTE: &str = "WITH exist AS (\
SELECT product_id, SUM(quantity) AS stock FROM stock_quant \
WHERE location_id = $1 GROUP BY product_id HAVING SUM(quantity) > 0), \
product AS (\
SELECT e.product_id, pt.categ_id, pt.name::text AS name, \
pt.list_price::float8 AS price, e.stock::float8 AS stock \
FROM exist e \
INNER JOIN product_product pp ON pp.id = e.product_id \
INNER JOIN product_template pt ON pt.id = pp.product_tmpl_id)";

const PRODUCT_COLUMNS: &str = "SELECT product.product_id::bigint AS id, product.name, \
pc.name::text AS category, product.price, product.stock";

const WITH_CATEGORY: &str = " FROM product LEFT JOIN product_category pc ON pc.id = product.categ_id";

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    BigInt(i64),
    BigIntArray(Vec<i64>),
}

/// SQL text plus its positional parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    sql: String,
    params: Vec<SqlParam>,
}

impl SqlStatement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<SqlParam>) {
        (self.sql, self.params)
    }
}

/// Paired data and count queries for one filtered page.
///
/// Both texts reference exactly the placeholders in `params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub data_sql: String,
    pub count_sql: String,
    pub params: Vec<SqlParam>,
}

impl CatalogQuery {
    pub fn data_statement(&self) -> SqlStatement {
        SqlStatement::new(self.data_sql.clone(), self.params.clone())
    }

    pub fn count_statement(&self) -> SqlStatement {
        SqlStatement::new(self.count_sql.clone(), self.params.clone())
    }
}

/// Ordered parameter accumulator handing out `$n` placeholders.
#[derive(Debug, Default)]
struct ParamList {
    params: Vec<SqlParam>,
}

impl ParamList {
    fn push(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn into_inner(self) -> Vec<SqlParam> {
        self.params
    }
}

/// One filter predicate of a catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    PriceRange { min: i64, max: i64 },
    /// Matched against the stored translation literal (`pt.name::text`), not
    /// the decoded name, so a needle may also hit another locale's entry.
    NameSubstring(String),
    CategoryMatch(Vec<String>),
}

impl Clause {
    fn from_filter(filter: &FilterSpec) -> Vec<Self> {
        let mut clauses = Vec::new();
        if let Some((min, max)) = filter.price_range() {
            clauses.push(Self::PriceRange { min, max });
        }
        if let Some(needle) = filter.name_substring() {
            clauses.push(Self::NameSubstring(needle.to_owned()));
        }
        if !filter.category_names().is_empty() {
            clauses.push(Self::CategoryMatch(
                filter.category_names().iter().cloned().collect(),
            ));
        }
        clauses
    }

    fn render(&self, params: &mut ParamList) -> String {
        match self {
            Self::PriceRange { min, max } => {
                let min = params.push(SqlParam::BigInt(*min));
                let max = params.push(SqlParam::BigInt(*max));
                format!("product.price >= {min} AND product.price <= {max}")
            }
            Self::NameSubstring(needle) => contains("product.name", needle, params),
            Self::CategoryMatch(names) => {
                let matches: Vec<String> = names
                    .iter()
                    .map(|name| contains("pc.name::text", name, params))
                    .collect();
                if matches.len() > 1 {
                    format!("({})", matches.join(" OR "))
                } else {
                    matches.concat()
                }
            }
        }
    }
}

fn contains(column: &str, needle: &str, params: &mut ParamList) -> String {
    let placeholder = params.push(SqlParam::Text(escape_like(needle)));
    format!("{column} LIKE '%' || {placeholder} || '%'")
}

/// Escape `LIKE` metacharacters so caller input only ever matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn where_clause(clauses: &[Clause], params: &mut ParamList) -> String {
    if clauses.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = clauses.iter().map(|c| c.render(params)).collect();
    format!(" WHERE {}", rendered.join(" AND "))
}

fn order_clause(order: OrderDirection) -> &'static str {
    // The id tie-breaker keeps row order stable across repeated reads.
    match order {
        OrderDirection::Ascending => " ORDER BY product.price ASC, product.product_id ASC",
        OrderDirection::Descending => " ORDER BY product.price DESC, product.product_id ASC",
        OrderDirection::None => " ORDER BY product.product_id ASC",
    }
}

/// Builds catalog statements against the inventory schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogQueryBuilder {
    stock_location_id: i64,
    customer_location_id: i64,
}

impl CatalogQueryBuilder {
    /// `stock_location_id` selects the warehouse whose stock counts as
    /// available; `customer_location_id` is where delivered goods land and
    /// drives the best-selling ranking.
    pub fn new(stock_location_id: i64, customer_location_id: i64) -> Self {
        Self {
            stock_location_id,
            customer_location_id,
        }
    }

    /// Render the data and count queries for `filter`.
    ///
    /// # Examples
    /// ```
    /// use catalog_backend::domain::catalog::{FilterSpec, PageRequest};
    /// use catalog_backend::outbound::persistence::CatalogQueryBuilder;
    ///
    /// let page = PageRequest::new(Some(2), Some(10), 20).expect("valid page");
    /// let filter = FilterSpec::new(page).with_name(Some("Gel".to_owned()));
    /// let query = CatalogQueryBuilder::new(8, 5).build(&filter);
    ///
    /// assert!(query.data_sql.ends_with("OFFSET 10 LIMIT 10"));
    /// assert!(!query.count_sql.contains("LIMIT"));
    /// assert_eq!(query.params.len(), 2);
    /// ```
    pub fn build(&self, filter: &FilterSpec) -> CatalogQuery {
        let mut params = ParamList::default();
        params.push(SqlParam::BigInt(self.stock_location_id));

        let clauses = Clause::from_filter(filter);
        let filters = where_clause(&clauses, &mut params);

        let data_sql = format!(
            "{STOCKED_PRODUCTS_CTE} {PRODUCT_COLUMNS}{WITH_CATEGORY}{filters}{order} OFFSET {offset} LIMIT {limit}",
            order = order_clause(filter.order()),
            offset = filter.offset(),
            limit = filter.limit(),
        );
        let count_sql =
            format!("{STOCKED_PRODUCTS_CTE} SELECT COUNT(*) AS total{WITH_CATEGORY}{filters}");

        CatalogQuery {
            data_sql,
            count_sql,
            params: params.into_inner(),
        }
    }

    /// Single in-stock product by id.
    pub fn product_by_id(&self, id: i64) -> SqlStatement {
        let mut params = ParamList::default();
        params.push(SqlParam::BigInt(self.stock_location_id));
        let id = params.push(SqlParam::BigInt(id));
        SqlStatement::new(
            format!(
                "{STOCKED_PRODUCTS_CTE} {PRODUCT_COLUMNS}{WITH_CATEGORY} WHERE product.product_id = {id}"
            ),
            params.into_inner(),
        )
    }

    /// In-stock products ranked by quantity delivered to the customer
    /// location, most sold first.
    pub fn best_selling(&self, limit: u32) -> SqlStatement {
        let mut params = ParamList::default();
        params.push(SqlParam::BigInt(self.stock_location_id));
        let destination = params.push(SqlParam::BigInt(self.customer_location_id));
        SqlStatement::new(
            format!(
                "{STOCKED_PRODUCTS_CTE}, sold AS (\
SELECT product_id, SUM(quantity_done) AS quantity FROM stock_move \
WHERE location_dest_id = {destination} GROUP BY product_id) \
{PRODUCT_COLUMNS} FROM product \
INNER JOIN sold ON sold.product_id = product.product_id \
INNER JOIN product_category pc ON pc.id = product.categ_id \
ORDER BY sold.quantity DESC, product.product_id ASC LIMIT {limit}"
            ),
            params.into_inner(),
        )
    }
}

#[cfg(test)]
#[path = "query_builder_tests.rs"]
mod tests;
