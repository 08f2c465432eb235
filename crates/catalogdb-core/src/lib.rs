#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod generate;
pub mod store;
pub mod traits;
pub mod types;

pub use error::{EngineError, Error, Result};
pub use store::CatalogStore;
pub use types::{Chunk, Record};
