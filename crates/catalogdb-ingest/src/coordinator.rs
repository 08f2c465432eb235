use crossbeam_channel::{bounded, select};
use indicatif::ProgressBar;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{error, info, warn};

use catalogdb_core::config::IngestConfig;
use catalogdb_core::traits::TextEngine;
use catalogdb_core::types::LoadReport;
use catalogdb_core::{CatalogStore, Chunk, Error, Result};

use crate::error_slot::ErrorSlot;
use crate::partition::partition;
use crate::worker;

enum Feed {
    Queued,
    Closed,
    Failed,
}

/// Runs a full, all-or-nothing bulk load of a catalog into a text engine.
///
/// `num_workers` threads are started before the first chunk is queued. The
/// queue holds at most `queue_buffer` chunks, so a slow engine blocks the feed
/// instead of growing memory. The first failed batch ends the load: nothing
/// more is queued and the error is returned without waiting for the workers,
/// which drain what is already queued and exit on their own.
///
/// Loads through one coordinator run one at a time; a second `load` waits for
/// the first to return.
pub struct IngestCoordinator<E> {
    engine: Arc<E>,
    config: IngestConfig,
    progress: ProgressBar,
    chunks_fed: AtomicUsize,
    running: Mutex<()>,
}

impl<E: TextEngine + 'static> IngestCoordinator<E> {
    pub fn new(engine: Arc<E>, config: IngestConfig) -> Self {
        Self { engine, config, progress: ProgressBar::hidden(), chunks_fed: AtomicUsize::new(0), running: Mutex::new(()) }
    }

    /// Report per-record progress on `progress` (hidden by default).
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Chunks handed to the queue by the running or most recent `load`.
    pub fn chunks_fed(&self) -> usize {
        self.chunks_fed.load(Ordering::Acquire)
    }

    pub fn load(&self, store: Arc<CatalogStore>) -> Result<LoadReport> {
        let _running = self.running.lock();
        self.config.validate()?;
        let partitioner = partition(store.len(), self.config.batch_size, self.config.num_workers)?;
        info!(
            records = store.len(),
            chunks = partitioner.chunk_count(),
            chunk_len = partitioner.chunk_len(),
            workers = self.config.num_workers,
            queue_buffer = self.config.queue_buffer,
            "starting bulk load"
        );
        self.chunks_fed.store(0, Ordering::Release);
        self.progress.set_length(store.len() as u64);
        let started = Instant::now();

        let (queue, chunks) = bounded::<Chunk>(self.config.queue_buffer);
        let (slot, failed) = ErrorSlot::new();
        let slot = Arc::new(slot);

        let mut workers = Vec::with_capacity(self.config.num_workers);
        for id in 0..self.config.num_workers {
            let store = Arc::clone(&store);
            let engine = Arc::clone(&self.engine);
            let chunks = chunks.clone();
            let slot = Arc::clone(&slot);
            let progress = self.progress.clone();
            let handle = thread::Builder::new()
                .name(format!("catalog-indexer-{id}"))
                .spawn(move || worker::run(id, &store, engine.as_ref(), &chunks, &slot, &progress))
                .map_err(|e| Error::WorkerSpawn(e.to_string()))?;
            workers.push(handle);
        }
        drop(chunks);

        let mut short_circuited = false;
        for chunk in partitioner {
            if slot.is_set() {
                short_circuited = true;
                break;
            }
            let fed = select! {
                send(queue, chunk) -> sent => match sent {
                    Ok(()) => Feed::Queued,
                    Err(_) => Feed::Closed,
                },
                recv(failed) -> _ => Feed::Failed,
            };
            match fed {
                Feed::Queued => {
                    self.chunks_fed.fetch_add(1, Ordering::AcqRel);
                }
                // every worker has exited; the join below reports why
                Feed::Closed => break,
                Feed::Failed => {
                    short_circuited = true;
                    break;
                }
            }
        }
        drop(queue);

        if short_circuited {
            if let Some(error) = slot.get() {
                warn!(chunks_fed = self.chunks_fed(), %error, "bulk load aborted");
                self.progress.abandon_with_message("indexing failed");
                return Err(error.clone());
            }
        }

        let mut indexed = 0usize;
        let mut panicked = None;
        for (id, handle) in workers.into_iter().enumerate() {
            match handle.join() {
                Ok(stats) => indexed += stats.records,
                Err(_) => {
                    error!(worker = id, "indexing worker panicked");
                    panicked.get_or_insert(id);
                }
            }
        }
        if let Some(error) = slot.get() {
            warn!(chunks_fed = self.chunks_fed(), %error, "bulk load failed");
            self.progress.abandon_with_message("indexing failed");
            return Err(error.clone());
        }
        if let Some(id) = panicked {
            self.progress.abandon_with_message("indexing failed");
            return Err(Error::WorkerPanicked(id));
        }

        self.engine.commit().map_err(Error::Commit)?;
        let report = LoadReport::new(indexed, self.chunks_fed(), started.elapsed());
        self.progress.finish_with_message("indexing completed");
        info!(
            records = report.records,
            chunks = report.chunks,
            elapsed_secs = report.elapsed.as_secs_f64(),
            docs_per_sec = report.docs_per_sec,
            "indexed catalog"
        );
        Ok(report)
    }
}
