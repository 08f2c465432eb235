//! Shared pieces of the catalogdb binaries: logging, catalog load and the HTTP search route.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogdb_core::config::Settings;
use catalogdb_core::generate::generate_catalog;
use catalogdb_core::traits::TextEngine;
use catalogdb_core::CatalogStore;
use catalogdb_ingest::IngestCoordinator;
use catalogdb_search::CatalogService;
use catalogdb_text::TantivyEngine;

pub type Service = CatalogService<TantivyEngine>;

/// Install the fmt subscriber; `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn progress_bar() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} products ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Generate the catalog described by `settings` and bulk-load it into a fresh index.
///
/// Blocks until the load has committed; any failed batch aborts start-up.
pub fn load_catalog(settings: &Settings, progress: ProgressBar) -> anyhow::Result<Service> {
    info!(size = settings.catalog.size, seed = ?settings.catalog.seed, "generating catalog");
    let store = Arc::new(CatalogStore::new(generate_catalog(settings.catalog.size, settings.catalog.seed))?);
    let engine = Arc::new(TantivyEngine::open(&settings.engine)?);
    let coordinator = IngestCoordinator::new(engine, settings.ingest.clone()).with_progress(progress);
    let service = CatalogService::load_with(coordinator, store, settings.search.clone())?;
    Ok(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub fn router<E: TextEngine + 'static>(service: Arc<CatalogService<E>>) -> Router {
    Router::new().route("/search", get(search::<E>)).with_state(service)
}

/// `GET /search?q=`: the records as JSON, with `x-total-count` set to how many were returned.
pub async fn search<E: TextEngine + 'static>(
    State(service): State<Arc<CatalogService<E>>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return (StatusCode::BAD_REQUEST, "q parameter required").into_response();
    }
    let outcome = tokio::task::spawn_blocking(move || service.search(&query)).await;
    match outcome {
        Ok(Ok(results)) => {
            let returned = results.records.len().to_string();
            ([("x-total-count", returned)], Json(results.records)).into_response()
        }
        Ok(Err(e)) if e.is_caller_error() => {
            debug!(error = %e, "rejected search request");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "search failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!(error = %e, "search task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "search task failed").into_response()
        }
    }
}
