use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;

use catalogdb_cli::{search, SearchParams};
use catalogdb_core::config::{IngestConfig, Settings};
use catalogdb_core::generate::generate_catalog;
use catalogdb_core::traits::{TextEngine, WriteBatch};
use catalogdb_core::types::{FuzzyRequest, SearchPage};
use catalogdb_core::{CatalogStore, EngineError, Error, Record};
use catalogdb_search::CatalogService;
use catalogdb_text::TantivyEngine;

/// Accepts every write, fails every search.
struct UnsearchableEngine;

struct CountingBatch(usize);

impl WriteBatch for CountingBatch {
    fn add(&mut self, _key: String, _record: &Record) {
        self.0 += 1;
    }

    fn len(&self) -> usize {
        self.0
    }
}

impl TextEngine for UnsearchableEngine {
    type Batch = CountingBatch;

    fn begin_batch(&self) -> CountingBatch {
        CountingBatch(0)
    }

    fn submit_batch(&self, _batch: CountingBatch) -> Result<(), EngineError> {
        Ok(())
    }

    fn commit(&self) -> Result<(), EngineError> {
        Ok(())
    }

    fn search(&self, _request: &FuzzyRequest) -> Result<SearchPage, EngineError> {
        Err(EngineError::Search("index unavailable".into()))
    }

    fn contains_key(&self, _key: &str) -> Result<bool, EngineError> {
        Ok(false)
    }

    fn doc_count(&self) -> Result<u64, EngineError> {
        Ok(0)
    }

    fn close(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

fn settings() -> Settings {
    Settings { ingest: IngestConfig { batch_size: 100, num_workers: 4, queue_buffer: 4 }, ..Settings::default() }
}

fn catalog(size: usize) -> Arc<CatalogStore> {
    Arc::new(CatalogStore::new(generate_catalog(size, Some(9))).expect("store"))
}

fn tantivy_service() -> Arc<CatalogService<TantivyEngine>> {
    let engine = Arc::new(TantivyEngine::in_memory().expect("engine"));
    Arc::new(CatalogService::load(catalog(500), engine, &settings()).expect("load"))
}

fn params(q: Option<&str>) -> Query<SearchParams> {
    Query(SearchParams { q: q.map(str::to_string) })
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn missing_or_empty_query_is_a_bad_request() {
    let service = tantivy_service();
    for q in [None, Some("")] {
        let response = search(State(Arc::clone(&service)), params(q)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "q parameter required");
    }
}

#[tokio::test]
async fn whitespace_query_is_rejected_by_the_service() {
    let response = search(State(tantivy_service()), params(Some("   "))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, Error::EmptyQuery.to_string());
}

#[tokio::test]
async fn engine_failure_is_a_server_error_with_its_message() {
    let service = CatalogService::load(catalog(50), Arc::new(UnsearchableEngine), &settings()).expect("load");
    let response = search(State(Arc::new(service)), params(Some("lamp"))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let expected = Error::Query(EngineError::Search("index unavailable".into())).to_string();
    assert_eq!(body_text(response).await, expected);
}

#[tokio::test]
async fn results_carry_the_returned_count_header() {
    let response = search(State(tantivy_service()), params(Some("backpak"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let header: usize = response
        .headers()
        .get("x-total-count")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .expect("x-total-count header");
    let records: Vec<Record> = serde_json::from_str(&body_text(response).await).expect("json records");
    assert!(!records.is_empty());
    assert!(records.len() <= 50);
    assert_eq!(header, records.len());
    assert!(records.iter().all(|r| r.name.contains("Backpack")));
}

#[tokio::test]
async fn unmatched_query_returns_an_empty_array() {
    let response = search(State(tantivy_service()), params(Some("zzzzzzzzzz"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-total-count").and_then(|v| v.to_str().ok()), Some("0"));
    assert_eq!(body_text(response).await, "[]");
}
