//! catalogdb-ingest
//!
//! Bulk loading of a [`CatalogStore`](catalogdb_core::CatalogStore) into a
//! text engine: the store is cut into chunks by `partition`, a fixed pool of
//! `worker` threads drains them from a bounded queue, and the `coordinator`
//! feeds that queue and stops at the first error latched in `error_slot`.
pub mod coordinator;
pub mod error_slot;
pub mod partition;
mod worker;

pub use coordinator::IngestCoordinator;
pub use error_slot::ErrorSlot;
pub use partition::{partition, Partitioner};
pub use worker::WorkerStats;
