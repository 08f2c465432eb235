#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use catalogdb_core::traits::{TextEngine, WriteBatch};
use catalogdb_core::types::{FuzzyRequest, SearchHit, SearchPage};
use catalogdb_core::{EngineError, Record};

pub fn records(n: u64) -> Vec<Record> {
    (1..=n).map(|id| Record::new(id, format!("product {id}"), "misc")).collect()
}

pub struct MemoryBatch {
    entries: Vec<(String, Record)>,
}

impl WriteBatch for MemoryBatch {
    fn add(&mut self, key: String, record: &Record) {
        self.entries.push((key, record.clone()));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

type FailRule = Box<dyn Fn(&[String]) -> Option<String> + Send + Sync>;

/// In-memory engine that records every submitted batch and can be told to
/// fail, panic, or hold batches until released.
#[derive(Default)]
pub struct MemoryEngine {
    staged: Mutex<BTreeMap<String, Record>>,
    committed: Mutex<BTreeMap<String, Record>>,
    batches: Mutex<Vec<Vec<String>>>,
    attempts: AtomicUsize,
    commits: AtomicUsize,
    fail: Option<FailRule>,
    panic_on_submit: bool,
    gated: bool,
    gate_open: AtomicBool,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_when(rule: impl Fn(&[String]) -> Option<String> + Send + Sync + 'static) -> Self {
        Self { fail: Some(Box::new(rule)), ..Self::default() }
    }

    pub fn always_failing() -> Self {
        Self::failing_when(|keys| Some(format!("rejected batch starting at {}", keys[0])))
    }

    pub fn panicking() -> Self {
        Self { panic_on_submit: true, ..Self::default() }
    }

    pub fn gated() -> Self {
        Self { gated: true, ..Self::default() }
    }

    pub fn open_gate(&self) {
        self.gate_open.store(true, Ordering::Release);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Acquire)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::Acquire)
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().clone()
    }

    pub fn committed_len(&self) -> usize {
        self.committed.lock().len()
    }
}

impl TextEngine for MemoryEngine {
    type Batch = MemoryBatch;

    fn begin_batch(&self) -> MemoryBatch {
        MemoryBatch { entries: Vec::new() }
    }

    fn submit_batch(&self, batch: MemoryBatch) -> Result<(), EngineError> {
        self.attempts.fetch_add(1, Ordering::AcqRel);
        if self.panic_on_submit {
            panic!("engine exploded");
        }
        while self.gated && !self.gate_open.load(Ordering::Acquire) {
            thread::sleep(Duration::from_millis(2));
        }
        let keys: Vec<String> = batch.entries.iter().map(|(k, _)| k.clone()).collect();
        if let Some(reason) = self.fail.as_ref().and_then(|rule| rule(&keys)) {
            return Err(EngineError::Write(reason));
        }
        self.batches.lock().push(keys);
        self.staged.lock().extend(batch.entries);
        Ok(())
    }

    fn commit(&self) -> Result<(), EngineError> {
        self.commits.fetch_add(1, Ordering::AcqRel);
        let staged = std::mem::take(&mut *self.staged.lock());
        self.committed.lock().extend(staged);
        Ok(())
    }

    fn search(&self, request: &FuzzyRequest) -> Result<SearchPage, EngineError> {
        let needle = request.text.to_lowercase();
        let committed = self.committed.lock();
        let matches: Vec<&String> = committed
            .iter()
            .filter(|(_, r)| r.name.to_lowercase().contains(&needle))
            .map(|(k, _)| k)
            .collect();
        let hits = matches
            .iter()
            .take(request.page_size)
            .map(|k| SearchHit { key: (*k).clone(), score: 1.0, highlights: Vec::new() })
            .collect();
        Ok(SearchPage { hits, total: matches.len() })
    }

    fn contains_key(&self, key: &str) -> Result<bool, EngineError> {
        Ok(self.committed.lock().contains_key(key))
    }

    fn doc_count(&self) -> Result<u64, EngineError> {
        Ok(self.committed.lock().len() as u64)
    }

    fn close(&self) -> Result<(), EngineError> {
        Ok(())
    }
}
