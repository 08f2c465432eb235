use crossbeam_channel::Receiver;
use indicatif::ProgressBar;
use tracing::{debug, warn};

use catalogdb_core::traits::{TextEngine, WriteBatch};
use catalogdb_core::{CatalogStore, Chunk, Error};

use crate::error_slot::ErrorSlot;

/// What one worker got through before it exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub worker: usize,
    pub chunks: usize,
    pub records: usize,
}

/// Drain `chunks` until the queue is closed and empty, submitting one batch
/// per chunk. Stops at the first failed submission after latching it.
pub(crate) fn run<E: TextEngine>(
    worker: usize,
    store: &CatalogStore,
    engine: &E,
    chunks: &Receiver<Chunk>,
    slot: &ErrorSlot,
    progress: &ProgressBar,
) -> WorkerStats {
    let mut stats = WorkerStats { worker, ..WorkerStats::default() };
    for chunk in chunks.iter() {
        let mut batch = engine.begin_batch();
        for record in store.slice(chunk) {
            batch.add(record.key(), record);
        }
        let len = batch.len();
        if let Err(source) = engine.submit_batch(batch) {
            warn!(worker, %chunk, error = %source, "batch submission failed");
            if !slot.latch(Error::BatchSubmission { chunk, source }) {
                debug!(worker, %chunk, "load already failed, dropping error");
            }
            return stats;
        }
        stats.chunks += 1;
        stats.records += len;
        progress.inc(len as u64);
    }
    debug!(worker, chunks = stats.chunks, records = stats.records, "indexing worker finished");
    stats
}
