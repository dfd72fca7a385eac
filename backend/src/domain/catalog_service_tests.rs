//! Tests for the catalog read service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::catalog::OrderDirection;
use crate::domain::ports::{MockProductCatalogRepository, StatementKind};
use rstest::rstest;

fn make_service(
    repo: MockProductCatalogRepository,
) -> CatalogService<MockProductCatalogRepository> {
    CatalogService::new(Arc::new(repo))
}

fn sample_page(total: u64) -> CatalogPage {
    CatalogPage {
        records: vec![ProductRecord {
            id: 1,
            name: "Shampoo".to_owned(),
            price: 20.0,
            category: "Hair Care".to_owned(),
            category_full_path: "All / Beauty / Hair Care".to_owned(),
            stock: 4.0,
            images: Vec::new(),
        }],
        total,
    }
}

#[tokio::test]
async fn list_products_applies_default_pagination() {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_fetch_page()
        .withf(|filter| {
            filter.offset() == 0
                && filter.limit() == DEFAULT_PAGE_SIZE
                && filter.category_names().is_empty()
                && filter.price_range().is_none()
        })
        .times(1)
        .return_once(|_| Ok(sample_page(1)));

    let page = make_service(repo)
        .list_products(PageParams::default())
        .await
        .expect("listing succeeds");
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn filter_products_translates_request_into_filter_spec() {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_fetch_page()
        .withf(|filter| {
            filter.offset() == 10
                && filter.limit() == 5
                && filter.price_range() == Some((15, 25))
                && filter.name_substring() == Some("Sham")
                && filter.order() == OrderDirection::Descending
                && filter.category_names().contains("Hair")
        })
        .times(1)
        .return_once(|_| Ok(sample_page(1)));

    let request = ProductFilterRequest {
        categories: vec!["Hair".to_owned()],
        min_price: Some(15),
        max_price: Some(25),
        name: Some("Sham".to_owned()),
        order: OrderDirection::Descending,
        page: PageParams {
            page: Some(3),
            page_size: Some(5),
        },
    };
    make_service(repo)
        .filter_products(request)
        .await
        .expect("filtered listing succeeds");
}

#[rstest]
#[case(Some(0), None)]
#[case(None, Some(0))]
#[case(Some(-1), Some(10))]
#[tokio::test]
async fn invalid_pagination_is_rejected_before_io(
    #[case] page: Option<i64>,
    #[case] page_size: Option<i64>,
) {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_fetch_page().never();

    let error = make_service(repo)
        .list_products(PageParams { page, page_size })
        .await
        .expect_err("validation error");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn related_products_default_to_five_per_page() {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_fetch_page()
        .withf(|filter| {
            filter.limit() == DEFAULT_RELATED_PAGE_SIZE
                && filter.category_names().len() == 1
                && filter.name_substring() == Some("Gel")
        })
        .times(1)
        .return_once(|_| Ok(sample_page(1)));

    make_service(repo)
        .related_products(RelatedProductsRequest {
            category: "Hair Care".to_owned(),
            name: "Gel".to_owned(),
            page: PageParams::default(),
        })
        .await
        .expect("related listing succeeds");
}

#[rstest]
#[case(CatalogRepositoryError::not_found(), ErrorCode::NotFound)]
#[case(CatalogRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(CatalogRepositoryError::timeout(500_u64), ErrorCode::ServiceUnavailable)]
#[case(
    CatalogRepositoryError::query(StatementKind::Count, "syntax error"),
    ErrorCode::InternalError
)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    #[case] failure: CatalogRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_fetch_page()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = make_service(repo)
        .list_products(PageParams::default())
        .await
        .expect_err("repository failure surfaces");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(0)]
#[case(-7)]
#[tokio::test]
async fn product_rejects_non_positive_ids(#[case] id: i64) {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_find_product().never();

    let error = make_service(repo)
        .product(id)
        .await
        .expect_err("validation error");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_find_product()
        .withf(|id| *id == 9)
        .times(1)
        .return_once(|_| Ok(None));

    let error = make_service(repo)
        .product(9)
        .await
        .expect_err("missing product");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(None, DEFAULT_BEST_SELLING_LIMIT)]
#[case(Some(0), DEFAULT_BEST_SELLING_LIMIT)]
#[case(Some(10), 10)]
#[tokio::test]
async fn best_selling_defaults_non_positive_limits(
    #[case] requested: Option<i64>,
    #[case] expected: u32,
) {
    let mut repo = MockProductCatalogRepository::new();
    repo.expect_best_selling()
        .withf(move |limit| *limit == expected)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let products = make_service(repo)
        .best_selling(requested)
        .await
        .expect("best selling succeeds");
    assert!(products.is_empty());
}
