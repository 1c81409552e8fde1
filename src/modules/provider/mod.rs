mod http_client;
mod traits;

pub mod jikan;
pub mod tmdb;

pub use http_client::ProviderHttpClient;
pub use jikan::JikanAdapter;
pub use tmdb::TmdbAdapter;
pub use traits::MediaProvider;
