mod adapter;
mod mapper;
mod models;

pub use adapter::TmdbAdapter;
