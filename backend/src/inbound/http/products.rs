//! Product catalog read endpoints.
//!
//! ```text
//! GET  /api/v1/products
//! POST /api/v1/products/filtered
//! POST /api/v1/products/related
//! GET  /api/v1/products/best-selling
//! GET  /api/v1/products/categories
//! GET  /api/v1/products/{id}
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::catalog::{CatalogPage, CategoryEntry, OrderDirection, ProductRecord};
use crate::domain::ports::{PageParams, ProductFilterRequest, RelatedProductsRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<i64>,
    /// Page size; defaults per endpoint.
    pub page_size: Option<i64>,
}

impl From<PageQuery> for PageParams {
    fn from(query: PageQuery) -> Self {
        Self {
            page: query.page,
            page_size: query.page_size,
        }
    }
}

/// Query parameters of the filtered listing.
///
/// Price bounds that do not parse as integers are ignored rather than
/// rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Case-sensitive product name substring.
    pub name: Option<String>,
    /// `asc` or `desc`; anything else leaves price order unset.
    pub order_value: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Body of the filtered listing.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoriesBody {
    /// Category names, OR-matched by substring.
    #[serde(default)]
    #[schema(example = json!(["Hair", "Skin"]))]
    pub categories: Vec<String>,
}

/// Body of the related-products listing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RelatedBody {
    #[schema(example = "Shampoo")]
    pub name: String,
    #[schema(example = "Hair Care")]
    pub category: String,
}

/// Query parameters of the best-selling ranking.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BestSellingQuery {
    /// Number of products; non-positive or missing selects the default.
    pub page_size: Option<i64>,
}

fn lenient_integer(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}

impl FilterQuery {
    fn into_request(self, categories: Vec<String>) -> ProductFilterRequest {
        ProductFilterRequest {
            categories,
            min_price: lenient_integer(self.min_price.as_deref()),
            max_price: lenient_integer(self.max_price.as_deref()),
            name: self.name,
            order: OrderDirection::from_query(self.order_value.as_deref()),
            page: PageParams {
                page: self.page,
                page_size: self.page_size,
            },
        }
    }
}

/// Register the catalog routes.
///
/// Literal paths are registered ahead of `/products/{id}` so they are never
/// captured by it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(filter_products)
        .service(related_products)
        .service(best_selling)
        .service(list_categories)
        .service(get_product);
}

/// List in-stock products.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = CatalogPage),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 404, description = "No products", body = Error),
        (status = 503, description = "Catalog unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<CatalogPage>> {
    let page = state.catalog.list_products(query.into_inner().into()).await?;
    Ok(web::Json(page))
}

/// List products matching categories, a price range and a name substring.
#[utoipa::path(
    post,
    path = "/api/v1/products/filtered",
    params(FilterQuery),
    request_body = CategoriesBody,
    responses(
        (status = 200, description = "Page of matching products", body = CatalogPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No products matched", body = Error),
        (status = 503, description = "Catalog unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "filterProducts"
)]
#[post("/products/filtered")]
pub async fn filter_products(
    state: web::Data<HttpState>,
    query: web::Query<FilterQuery>,
    body: web::Json<CategoriesBody>,
) -> ApiResult<web::Json<CatalogPage>> {
    let request = query.into_inner().into_request(body.into_inner().categories);
    let page = state.catalog.filter_products(request).await?;
    Ok(web::Json(page))
}

/// List products in the same category with a similar name.
#[utoipa::path(
    post,
    path = "/api/v1/products/related",
    params(PageQuery),
    request_body = RelatedBody,
    responses(
        (status = 200, description = "Page of related products", body = CatalogPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No related products", body = Error),
        (status = 503, description = "Catalog unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "relatedProducts"
)]
#[post("/products/related")]
pub async fn related_products(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
    body: web::Json<RelatedBody>,
) -> ApiResult<web::Json<CatalogPage>> {
    let RelatedBody { name, category } = body.into_inner();
    let request = RelatedProductsRequest {
        category,
        name,
        page: query.into_inner().into(),
    };
    let page = state.catalog.related_products(request).await?;
    Ok(web::Json(page))
}

/// Top-selling in-stock products.
#[utoipa::path(
    get,
    path = "/api/v1/products/best-selling",
    params(BestSellingQuery),
    responses(
        (status = 200, description = "Products ranked by sales", body = [ProductRecord]),
        (status = 503, description = "Catalog unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "bestSellingProducts"
)]
#[get("/products/best-selling")]
pub async fn best_selling(
    state: web::Data<HttpState>,
    query: web::Query<BestSellingQuery>,
) -> ApiResult<web::Json<Vec<ProductRecord>>> {
    let products = state.catalog.best_selling(query.page_size).await?;
    Ok(web::Json(products))
}

/// Leaf categories for filter population.
#[utoipa::path(
    get,
    path = "/api/v1/products/categories",
    responses(
        (status = 200, description = "Leaf categories", body = [CategoryEntry]),
        (status = 503, description = "Catalog unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "listCategories"
)]
#[get("/products/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryEntry>>> {
    let categories = state.catalog.categories().await?;
    Ok(web::Json(categories))
}

/// One in-stock product with its images.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product", body = ProductRecord),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Product not found", body = Error),
        (status = 503, description = "Catalog unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<ProductRecord>> {
    let product = state.catalog.product(id.into_inner()).await?;
    Ok(web::Json(product))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
