mod json_file_store;
mod store;

pub use json_file_store::JsonFileStore;
pub use store::CacheStore;
