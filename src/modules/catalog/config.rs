use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CACHE_PATH: &str = "data/media_cache.jsonl";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the catalog, collected from the environment.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Where the JSON-lines cache snapshot lives.
    pub cache_path: PathBuf,
    /// TMDB v3 API key; without one the TMDB adapter is not registered.
    pub tmdb_api_key: Option<String>,
    /// Upper bound on any single provider call. A timed-out call counts as a
    /// failed one.
    pub provider_timeout: Duration,
}

impl CatalogConfig {
    /// Read configuration from `MEDLEY_*` environment variables, picking up a
    /// `.env` file when present. Missing variables fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let cache_path = std::env::var("MEDLEY_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH));

        let tmdb_api_key = std::env::var("MEDLEY_TMDB_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let provider_timeout = std::env::var("MEDLEY_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS));

        Self {
            cache_path,
            tmdb_api_key,
            provider_timeout,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            tmdb_api_key: None,
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}
