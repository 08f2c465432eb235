//! catalogdb-text
//!
//! Tantivy-backed implementation of the catalog's text engine boundary:
//! schema and analyzers live in `tantivy_utils`, the engine in `engine`.
pub mod engine;
pub mod tantivy_utils;

pub use engine::{TantivyBatch, TantivyEngine};
