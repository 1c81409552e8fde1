pub mod cache;
pub mod catalog;
pub mod media;
pub mod provider;
