pub mod gateway;
pub mod service;

pub use gateway::{hydrate, SearchGateway};
pub use service::CatalogService;
