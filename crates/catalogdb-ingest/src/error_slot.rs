use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::OnceLock;

use catalogdb_core::Error;

/// Set-once holder for the first error of a load.
///
/// The first [`latch`](Self::latch) wins; later calls are dropped without
/// blocking. A successful latch also posts one wake-up on the paired
/// receiver so a producer blocked on a full queue can notice the failure.
#[derive(Debug)]
pub struct ErrorSlot {
    error: OnceLock<Error>,
    wake: Sender<()>,
}

impl ErrorSlot {
    pub fn new() -> (Self, Receiver<()>) {
        let (wake, woken) = bounded(1);
        (Self { error: OnceLock::new(), wake }, woken)
    }

    /// Store `error` if the slot is empty. Returns whether it was stored.
    pub fn latch(&self, error: Error) -> bool {
        let stored = self.error.set(error).is_ok();
        if stored {
            let _ = self.wake.try_send(());
        }
        stored
    }

    pub fn get(&self) -> Option<&Error> {
        self.error.get()
    }

    pub fn is_set(&self) -> bool {
        self.error.get().is_some()
    }
}
