//! Tests for concurrent catalog query execution.

use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::domain::catalog::{DEFAULT_PAGE_SIZE, FilterSpec, PageRequest};
use crate::outbound::persistence::query_builder::CatalogQueryBuilder;
use crate::outbound::persistence::test_support::{Call, ScriptedReader, product_row};
use rstest::rstest;

const GENEROUS: Duration = Duration::from_secs(5);

fn query() -> CatalogQuery {
    let page = PageRequest::new(Some(2), Some(10), DEFAULT_PAGE_SIZE).expect("valid page");
    let filter = FilterSpec::new(page).with_name(Some("Sham".to_owned()));
    CatalogQueryBuilder::new(8, 5).build(&filter)
}

fn executor(reader: ScriptedReader, timeout: Duration) -> (CatalogExecutor<ScriptedReader>, Arc<ScriptedReader>) {
    let reader = Arc::new(reader);
    (CatalogExecutor::new(Arc::clone(&reader), timeout), reader)
}

fn two_products() -> Vec<ProductRow> {
    vec![
        product_row(7, "{en_US: Shampoo, es_ES: Champú}", "All / Beauty / Hair", 20.0),
        product_row(3, "{en_US: Soap}", "All / Beauty / Skin", 12.5),
    ]
}

#[tokio::test]
async fn page_keeps_row_order_and_reports_total() {
    let reader = ScriptedReader::default()
        .with_count(Ok(42))
        .with_products(Ok(two_products()));
    let (executor, reader) = executor(reader, GENEROUS);

    let page = executor.fetch(query()).await.expect("page fetched");

    assert_eq!(page.total, 42);
    let ids: Vec<u64> = page.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![7, 3]);
    assert_eq!(page.records[0].name, "Champú");
    assert_eq!(page.records[0].category, "Hair");
    assert_eq!(page.records[0].category_full_path, "All / Beauty / Hair");
    assert!(page.records.iter().all(|r| r.images.is_empty()));

    let expected = query();
    assert_eq!(reader.statements(Call::Count), vec![expected.count_statement()]);
    assert_eq!(reader.statements(Call::Products), vec![expected.data_statement()]);
}

#[tokio::test]
async fn zero_total_is_not_found() {
    let reader = ScriptedReader::default()
        .with_count(Ok(0))
        .with_products(Ok(Vec::new()));
    let (executor, _) = executor(reader, GENEROUS);

    let error = executor.fetch(query()).await.expect_err("empty filter");

    assert_eq!(error, CatalogRepositoryError::not_found());
}

#[tokio::test]
async fn count_failure_returns_without_waiting_for_data() {
    let reader = ScriptedReader::default()
        .with_count(Err(SqlReadError::Query("relation missing".to_owned())))
        .with_products(Ok(two_products()))
        .with_products_delay(Duration::from_secs(3));
    let (executor, reader) = executor(reader, GENEROUS);

    let error = tokio::time::timeout(Duration::from_secs(1), executor.fetch(query()))
        .await
        .expect("count failure is reported before the data query finishes")
        .expect_err("count failure");

    assert_eq!(
        error,
        CatalogRepositoryError::query(StatementKind::Count, "relation missing")
    );
    assert!(!reader.products_finished());
}

#[tokio::test]
async fn detached_data_task_runs_to_completion_after_count_failure() {
    let reader = ScriptedReader::default()
        .with_count(Err(SqlReadError::Query("relation missing".to_owned())))
        .with_products(Ok(two_products()))
        .with_products_delay(Duration::from_millis(50));
    let (executor, reader) = executor(reader, GENEROUS);

    executor.fetch(query()).await.expect_err("count failure");
    assert!(!reader.products_finished());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(reader.products_finished());
}

#[tokio::test]
async fn data_failure_is_attributed_to_the_data_query() {
    let reader = ScriptedReader::default()
        .with_count(Ok(2))
        .with_products(Err(SqlReadError::Query("column missing".to_owned())));
    let (executor, _) = executor(reader, GENEROUS);

    let error = executor.fetch(query()).await.expect_err("data failure");

    assert_eq!(
        error,
        CatalogRepositoryError::query(StatementKind::Data, "column missing")
    );
}

#[tokio::test]
async fn panicked_data_task_is_a_data_failure() {
    let reader = ScriptedReader::default()
        .with_count(Ok(2))
        .with_products_panic();
    let (executor, _) = executor(reader, GENEROUS);

    let error = executor.fetch(query()).await.expect_err("data task panicked");

    assert!(matches!(
        error,
        CatalogRepositoryError::Query {
            statement: StatementKind::Data,
            ..
        }
    ));
}

#[tokio::test]
async fn connection_failures_keep_their_kind() {
    let reader = ScriptedReader::default()
        .with_count(Err(SqlReadError::Connection("pool exhausted".to_owned())));
    let (executor, _) = executor(reader, GENEROUS);

    let error = executor.fetch(query()).await.expect_err("no connection");

    assert_eq!(error, CatalogRepositoryError::connection("pool exhausted"));
}

#[tokio::test]
async fn timeout_aborts_the_data_query() {
    let reader = ScriptedReader::default()
        .with_count(Ok(2))
        .with_count_delay(Duration::from_millis(20))
        .with_products(Ok(two_products()))
        .with_products_delay(Duration::from_millis(400));
    let (executor, reader) = executor(reader, Duration::from_millis(50));

    let error = executor.fetch(query()).await.expect_err("timed out");
    assert_eq!(error, CatalogRepositoryError::timeout(50_u64));

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!reader.products_finished(), "data task should be aborted");
}

#[tokio::test]
async fn repeated_concurrent_fetches_are_identical() {
    let reader = ScriptedReader::default()
        .with_count(Ok(2))
        .with_count_delay(Duration::from_millis(5))
        .with_products(Ok(two_products()))
        .with_products_delay(Duration::from_millis(10));
    let (executor, _) = executor(reader, GENEROUS);

    let (first, second, third) = tokio::join!(
        executor.fetch(query()),
        executor.fetch(query()),
        executor.fetch(query())
    );
    let first = first.expect("first fetch");

    assert_eq!(second.expect("second fetch"), first);
    assert_eq!(third.expect("third fetch"), first);
}

#[rstest]
#[case(None)]
#[case(Some("no separator here"))]
fn undecodable_names_fall_back_to_empty(#[case] name: Option<&str>) {
    let row = ProductRow {
        name: name.map(str::to_owned),
        ..product_row(5, "", "All / Tools", 9.0)
    };

    let record = normalize_row(row, StatementKind::Data).expect("row kept");

    assert_eq!(record.name, "");
    assert_eq!(record.category, "Tools");
    assert_eq!(record.price, 9.0);
}

#[rstest]
fn missing_category_yields_empty_strings() {
    let row = ProductRow {
        category: None,
        ..product_row(5, "{en_US: Rake}", "", 9.0)
    };

    let record = normalize_row(row, StatementKind::Product).expect("row kept");

    assert_eq!(record.category, "");
    assert_eq!(record.category_full_path, "");
    assert_eq!(record.name, "Rake");
}

#[rstest]
fn negative_ids_are_query_failures() {
    let row = product_row(-1, "{en_US: Rake}", "All", 1.0);

    let error = normalize_row(row, StatementKind::BestSelling).expect_err("invalid id");

    assert!(matches!(
        error,
        CatalogRepositoryError::Query {
            statement: StatementKind::BestSelling,
            ..
        }
    ));
}

#[tokio::test]
async fn fetch_rows_attributes_failures_to_the_given_statement() {
    let reader = ScriptedReader::default()
        .with_products(Err(SqlReadError::Query("boom".to_owned())));
    let (executor, _) = executor(reader, GENEROUS);
    let statement = CatalogQueryBuilder::new(8, 5).product_by_id(1);

    let error = executor
        .fetch_rows(statement, StatementKind::Product)
        .await
        .expect_err("query failed");

    assert_eq!(error, CatalogRepositoryError::query(StatementKind::Product, "boom"));
}
