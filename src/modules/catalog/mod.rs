mod config;
mod service;

pub use config::CatalogConfig;
pub use service::CatalogService;
