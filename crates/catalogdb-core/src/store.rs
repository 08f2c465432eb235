//! Immutable, position-addressed record store.

use crate::error::{Error, Result};
use crate::types::{Chunk, Record};

/// Ordered catalog where `records[i].id == i + 1`.
///
/// There is no mutating API: once built, the store is shared read-only
/// (typically as `Arc<CatalogStore>`) by indexing workers and queries alike.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<Record>,
}

impl CatalogStore {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        for (position, record) in records.iter().enumerate() {
            let expected = position as u64 + 1;
            if record.id != expected {
                return Err(Error::InvalidCatalog(format!(
                    "record at position {position} has id {}, expected {expected}",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a record up by id. Ids outside `1..=len` yield `None`.
    pub fn get(&self, id: u64) -> Option<&Record> {
        let position = usize::try_from(id.checked_sub(1)?).ok()?;
        self.records.get(position)
    }

    /// Resolve a document key back to its record.
    pub fn resolve_key(&self, key: &str) -> Option<&Record> {
        key.parse::<u64>().ok().and_then(|id| self.get(id))
    }

    /// Records covered by `chunk`, clamped to the store bounds.
    pub fn slice(&self, chunk: Chunk) -> &[Record] {
        let end = chunk.end.min(self.records.len());
        let start = chunk.start.min(end);
        &self.records[start..end]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}
