use std::sync::Arc;

use catalogdb_core::config::{SearchConfig, Settings};
use catalogdb_core::traits::TextEngine;
use catalogdb_core::types::{LoadReport, SearchResults};
use catalogdb_core::{CatalogStore, EngineError, Result};
use catalogdb_ingest::IngestCoordinator;

/// A catalog whose bulk load has completed, ready to serve queries.
///
/// The only way to obtain one is a successful [`load`](Self::load), so a
/// service never answers queries against a partially indexed catalog.
pub struct CatalogService<E> {
    gateway: crate::SearchGateway<E>,
    report: LoadReport,
}

impl<E: TextEngine + 'static> CatalogService<E> {
    pub fn load(store: Arc<CatalogStore>, engine: Arc<E>, settings: &Settings) -> Result<Self> {
        let coordinator = IngestCoordinator::new(engine, settings.ingest.clone());
        Self::load_with(coordinator, store, settings.search.clone())
    }

    /// Load through a pre-configured coordinator (e.g. one reporting progress).
    pub fn load_with(coordinator: IngestCoordinator<E>, store: Arc<CatalogStore>, search: SearchConfig) -> Result<Self> {
        search.validate()?;
        let report = coordinator.load(Arc::clone(&store))?;
        let engine = Arc::clone(coordinator.engine());
        Ok(Self { gateway: crate::SearchGateway::new(store, engine, search), report })
    }

    pub fn search(&self, query: &str) -> Result<SearchResults> {
        self.gateway.search(query)
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        self.gateway.store()
    }

    pub fn engine(&self) -> &Arc<E> {
        self.gateway.engine()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Release the engine. Queries may still be answered from committed data.
    pub fn shutdown(&self) -> std::result::Result<(), EngineError> {
        self.gateway.engine().close()
    }
}
