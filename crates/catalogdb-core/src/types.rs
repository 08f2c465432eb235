//! Domain types shared by the ingestion and query paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::time::Duration;

/// A catalog entry.
///
/// `id` is dense and 1-based: it is both the record's position in the
/// [`CatalogStore`](crate::CatalogStore) (`id - 1`) and, in decimal form, its
/// document key in the text index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub category: String,
}

impl Record {
    pub fn new(id: u64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self { id, name: name.into(), category: category.into() }
    }

    /// Document key under which this record is indexed.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Half-open range `[start, end)` of store positions handed to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "chunk start {start} past end {end}");
        Self { start, end }
    }

    /// Number of positions covered; a reversed chunk covers none.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end.max(self.start)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A fuzzy query as handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyRequest {
    pub text: String,
    pub fuzziness: u8,
    pub page_size: usize,
    pub highlight: bool,
}

/// One ranked match returned by the engine. Higher `score` is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub key: String,
    pub score: f32,
    pub highlights: Vec<String>,
}

/// A page of hits in engine rank order plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub total: usize,
}

/// Observability data attached to a query; not part of the result contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMeta {
    pub total_hits: usize,
    pub returned: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Hydrated records in engine rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub records: Vec<Record>,
    pub meta: SearchMeta,
}

/// Outcome of a successful bulk load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    pub records: usize,
    pub chunks: usize,
    pub elapsed: Duration,
    pub docs_per_sec: f64,
}

impl LoadReport {
    pub fn new(records: usize, chunks: usize, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        let docs_per_sec = if secs > 0.0 { records as f64 / secs } else { 0.0 };
        Self { records, chunks, elapsed, docs_per_sec }
    }
}
