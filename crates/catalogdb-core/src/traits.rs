use crate::error::EngineError;
use crate::types::{FuzzyRequest, Record, SearchPage};

/// Write operations accumulated for one atomic submission.
pub trait WriteBatch: Send {
    fn add(&mut self, key: String, record: &Record);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Boundary with the full-text index.
///
/// Implementations must accept concurrent `submit_batch` and `search` calls
/// from many threads.
pub trait TextEngine: Send + Sync {
    type Batch: WriteBatch;

    fn begin_batch(&self) -> Self::Batch;

    fn submit_batch(&self, batch: Self::Batch) -> Result<(), EngineError>;

    /// Index one document as a single-element batch.
    fn index(&self, key: String, record: &Record) -> Result<(), EngineError> {
        let mut batch = self.begin_batch();
        batch.add(key, record);
        self.submit_batch(batch)
    }

    /// Make every submitted batch visible to `search`.
    fn commit(&self) -> Result<(), EngineError>;

    fn search(&self, request: &FuzzyRequest) -> Result<SearchPage, EngineError>;

    fn contains_key(&self, key: &str) -> Result<bool, EngineError>;

    fn doc_count(&self) -> Result<u64, EngineError>;

    fn close(&self) -> Result<(), EngineError>;
}
