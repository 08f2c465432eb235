use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use catalogdb_core::config::SearchConfig;
use catalogdb_core::traits::TextEngine;
use catalogdb_core::types::{FuzzyRequest, SearchHit, SearchMeta, SearchResults};
use catalogdb_core::{CatalogStore, Error, Record, Result};

/// Resolve hits to records in rank order.
///
/// Keys that do not parse as an id or fall outside the store are dropped;
/// the second value counts them.
pub fn hydrate(store: &CatalogStore, hits: &[SearchHit]) -> (Vec<Record>, usize) {
    let mut records = Vec::with_capacity(hits.len());
    let mut skipped = 0;
    for hit in hits {
        match store.resolve_key(&hit.key) {
            Some(record) => records.push(record.clone()),
            None => {
                debug!(key = %hit.key, "search hit has no catalog record");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

/// Fuzzy search over an engine, hydrated against the catalog it was loaded from.
pub struct SearchGateway<E> {
    store: Arc<CatalogStore>,
    engine: Arc<E>,
    config: SearchConfig,
}

impl<E: TextEngine> SearchGateway<E> {
    pub fn new(store: Arc<CatalogStore>, engine: Arc<E>, config: SearchConfig) -> Self {
        Self { store, engine, config }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn request(&self, query: &str) -> FuzzyRequest {
        FuzzyRequest {
            text: query.to_string(),
            fuzziness: self.config.fuzziness,
            page_size: self.config.page_size,
            highlight: self.config.highlight,
        }
    }

    pub fn search(&self, query: &str) -> Result<SearchResults> {
        if query.trim().is_empty() {
            if !query.is_empty() {
                debug!(len = query.len(), "whitespace-only query rejected");
            }
            return Err(Error::EmptyQuery);
        }
        let started = Instant::now();
        let page = self.engine.search(&self.request(query)).map_err(Error::Query)?;
        let (records, skipped) = hydrate(&self.store, &page.hits);
        let meta = SearchMeta { total_hits: page.total, returned: records.len(), skipped, elapsed: started.elapsed() };
        info!(
            query,
            total_hits = meta.total_hits,
            returned = meta.returned,
            skipped = meta.skipped,
            elapsed_ms = meta.elapsed.as_secs_f64() * 1000.0,
            "search completed"
        );
        Ok(SearchResults { records, meta })
    }
}
