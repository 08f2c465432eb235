use catalogdb_core::config::chunk_len;
use catalogdb_core::{Chunk, Result};

/// Lazily yields contiguous chunks covering `[0, total)` in ascending order.
///
/// Every chunk has `chunk_len` positions except possibly the last one.
#[derive(Debug, Clone)]
pub struct Partitioner {
    total: usize,
    chunk_len: usize,
    next: usize,
}

impl Partitioner {
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Number of chunks a full pass yields.
    pub fn chunk_count(&self) -> usize {
        self.total.div_ceil(self.chunk_len)
    }
}

impl Iterator for Partitioner {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.next >= self.total {
            return None;
        }
        let start = self.next;
        let end = start.saturating_add(self.chunk_len).min(self.total);
        self.next = end;
        Some(Chunk::new(start, end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next.min(self.total)).div_ceil(self.chunk_len);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Partitioner {}

/// Split `total` positions into chunks of `batch_size / num_workers`.
///
/// Rejects parameters that would give an empty chunk length.
pub fn partition(total: usize, batch_size: usize, num_workers: usize) -> Result<Partitioner> {
    Ok(Partitioner { total, chunk_len: chunk_len(batch_size, num_workers)?, next: 0 })
}
