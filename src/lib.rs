pub mod modules;
pub mod shared;

// Re-export the aggregator surface and the types its callers handle.
pub use modules::cache::{CacheStore, JsonFileStore};
pub use modules::catalog::{CatalogConfig, CatalogService};
pub use modules::media::{cache_key, MediaDetails, MediaKind, MediaRecord, MediaSource};
pub use modules::provider::{JikanAdapter, MediaProvider, TmdbAdapter};
pub use shared::errors::{CatalogError, CatalogResult};
pub use shared::utils::logger::init_logger;
