//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalog endpoint and the read-model schemas.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it for
//! external tooling.

use utoipa::OpenApi;

use crate::domain::catalog::{CatalogPage, CategoryEntry, ProductRecord};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::{Lifecycle, ProbeStatus};
use crate::inbound::http::products::{CategoriesBody, RelatedBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product catalog API",
        description = "Filtered, paginated reads over the inventory product catalog."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::filter_products,
        crate::inbound::http::products::related_products,
        crate::inbound::http::products::best_selling,
        crate::inbound::http::products::list_categories,
        crate::inbound::http::products::get_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CatalogPage,
        ProductRecord,
        CategoryEntry,
        CategoriesBody,
        RelatedBody,
        Error,
        ErrorCode,
        ProbeStatus,
        Lifecycle
    )),
    tags(
        (name = "products", description = "Product catalog reads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
