use thiserror::Error;

use crate::types::Chunk;

/// Failures reported by a text-indexing engine implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("unknown analyzer '{analyzer}' for field '{field}'")]
    Analyzer { field: String, analyzer: String },

    #[error("write failed: {0}")]
    Write(String),

    #[error("search failed: {0}")]
    Search(String),

    #[error("engine is closed")]
    Closed,
}

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Batch submission failed for chunk {chunk}: {source}")]
    BatchSubmission {
        chunk: Chunk,
        #[source]
        source: EngineError,
    },

    #[error("Commit failed: {0}")]
    Commit(#[source] EngineError),

    #[error("Indexing worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("Failed to spawn indexing worker: {0}")]
    WorkerSpawn(String),

    #[error("Query failed: {0}")]
    Query(#[source] EngineError),

    #[error("Query text must not be empty")]
    EmptyQuery,
}

impl Error {
    /// True for errors caused by the caller's input rather than the system.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::EmptyQuery)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
