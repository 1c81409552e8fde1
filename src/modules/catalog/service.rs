use crate::modules::cache::{CacheStore, JsonFileStore};
use crate::modules::media::{cache_key, MediaKind, MediaRecord, MediaSource};
use crate::modules::provider::{JikanAdapter, MediaProvider, TmdbAdapter};
use crate::shared::errors::{CatalogError, CatalogResult};
use crate::shared::utils::logger::LogContext;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::CatalogConfig;

/// Orchestrates provider adapters and the cache store behind one lookup
/// surface.
///
/// Searches fan out to every registered adapter and merge in registration
/// order; point lookups try the live adapter first and degrade to the cache
/// when the provider cannot answer. Every record that passes through a search
/// is written through to the cache under its composite key, but only if that
/// key is still absent: the cache favors fewer writes over freshness, so a
/// cached record is never refreshed by this path.
pub struct CatalogService {
    /// Registration order, which fixes merge order for searches.
    providers: Vec<Arc<dyn MediaProvider>>,
    by_source: HashMap<MediaSource, Arc<dyn MediaProvider>>,
    cache: Arc<dyn CacheStore>,
    provider_timeout: Duration,
}

impl CatalogService {
    pub fn new(cache: Arc<dyn CacheStore>, provider_timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            by_source: HashMap::new(),
            cache,
            provider_timeout,
        }
    }

    /// Build a service from configuration: JSON-file cache, the Jikan
    /// adapter, and the TMDB adapter when an API key is configured.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let cache = Arc::new(JsonFileStore::open(&config.cache_path)?);
        let mut service = Self::new(cache, config.provider_timeout);

        service.register_provider(Arc::new(JikanAdapter::new()));
        match &config.tmdb_api_key {
            Some(key) => service.register_provider(Arc::new(TmdbAdapter::new(key.clone()))),
            None => log::warn!("No TMDB API key configured, movie/TV source disabled"),
        }

        Ok(service)
    }

    /// Register an adapter. A later registration for the same source replaces
    /// the earlier one as that source's live tier, but search fan-out keeps
    /// first-registration order.
    pub fn register_provider(&mut self, provider: Arc<dyn MediaProvider>) {
        let source = provider.source();
        if let Some(slot) = self
            .providers
            .iter_mut()
            .find(|existing| existing.source() == source)
        {
            *slot = provider.clone();
        } else {
            self.providers.push(provider.clone());
        }
        self.by_source.insert(source, provider);
    }

    pub fn registered_sources(&self) -> Vec<MediaSource> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    /// Fan a title query out to every registered adapter concurrently and
    /// merge the results in registration order, each block in provider order.
    ///
    /// A failing or timed-out adapter contributes zero results and never
    /// aborts the search, so all providers being down looks the same as
    /// nothing matching: an empty list. Duplicates across sources are kept,
    /// since their identities differ.
    pub async fn search_all(&self, query: &str, limit: usize) -> Vec<MediaRecord> {
        LogContext::search_operation(query, None, None);

        let per_call_timeout = self.provider_timeout;
        let calls = self.providers.iter().map(|provider| {
            let provider = provider.clone();
            async move {
                let outcome = timeout(per_call_timeout, provider.search_by_title(query, limit)).await;
                (provider.source(), outcome)
            }
        });

        let mut merged = Vec::new();
        for (source, outcome) in join_all(calls).await {
            match outcome {
                Ok(Ok(records)) => {
                    LogContext::search_operation(query, Some(source.as_str()), Some(records.len()));
                    merged.extend(records);
                }
                Ok(Err(e)) => {
                    LogContext::error_with_context(
                        &e,
                        &format!("Provider {} failed for search '{}'", source, query),
                    );
                }
                Err(_) => {
                    log::warn!("Provider {} timed out for search '{}'", source, query);
                }
            }
        }

        self.cache_if_absent(&merged).await;
        merged
    }

    /// Resolve one record by its caller-visible (id, source, kind) triple.
    ///
    /// Live adapter first: a reachable provider always wins, even over a
    /// fresher-looking cached copy. Only when the adapter fails, knows no
    /// such id, or is absent does the cache tier run, probing the hinted kind
    /// or, without a hint, every kind the source emits in its fixed order.
    /// Exhausting both tiers is `NotFound`; so is a broken cache medium,
    /// since callers have no separate storage-failure case.
    pub async fn get_by_id(
        &self,
        id: &str,
        source: MediaSource,
        kind_hint: Option<MediaKind>,
    ) -> CatalogResult<MediaRecord> {
        if let Some(provider) = self.by_source.get(&source) {
            match timeout(self.provider_timeout, provider.get_by_id(id)).await {
                Ok(Ok(Some(record))) => return Ok(record),
                Ok(Ok(None)) => {
                    log::debug!("Provider {} has no record with id '{}'", source, id)
                }
                Ok(Err(e)) => {
                    LogContext::error_with_context(
                        &e,
                        &format!("Provider {} failed for id '{}', trying cache", source, id),
                    );
                }
                Err(_) => {
                    log::warn!("Provider {} timed out for id '{}', trying cache", source, id)
                }
            }
        } else {
            log::debug!("No live adapter for {}, going straight to cache", source);
        }

        let probe_kinds: &[MediaKind] = match kind_hint {
            Some(ref kind) => std::slice::from_ref(kind),
            None => source.known_kinds(),
        };

        for kind in probe_kinds {
            let key = cache_key(source, *kind, id);
            match self.cache.get(&key).await {
                Ok(Some(mut record)) => {
                    LogContext::cache_operation("get", &key, "hit");
                    // The composite key must never leak: hand back the native
                    // id the caller supplied.
                    record.id = id.to_string();
                    return Ok(record);
                }
                Ok(None) => LogContext::cache_operation("get", &key, "miss"),
                Err(e) => {
                    LogContext::error_with_context(
                        &e,
                        &format!("Cache read failed for key '{}'", key),
                    );
                    break;
                }
            }
        }

        Err(CatalogError::NotFound(format!(
            "No record with id '{}' from {} in any tier",
            id, source
        )))
    }

    /// Top-rated listing from one source, written through the cache like
    /// search results.
    pub async fn top_rated(
        &self,
        source: MediaSource,
        page: u32,
        limit: usize,
    ) -> CatalogResult<Vec<MediaRecord>> {
        let provider = self.live_provider(source)?;
        let records = self
            .bounded(provider.top_rated(page, limit), source)
            .await?;
        self.cache_if_absent(&records).await;
        Ok(records)
    }

    /// Latest/currently-running listing from one source.
    pub async fn latest(
        &self,
        source: MediaSource,
        page: u32,
        limit: usize,
    ) -> CatalogResult<Vec<MediaRecord>> {
        let provider = self.live_provider(source)?;
        let records = self.bounded(provider.latest(page, limit), source).await?;
        self.cache_if_absent(&records).await;
        Ok(records)
    }

    /// Title search over the local cache only. Serves offline browsing; hits
    /// whatever earlier searches left behind, in no particular order.
    pub async fn search_cached(&self, query: &str) -> Vec<MediaRecord> {
        let hits = self.cache.search_title(query).await;
        LogContext::search_operation(query, Some(MediaSource::Local.as_str()), Some(hits.len()));
        hits
    }

    /// Genre browse over the local cache only. Whole-genre match, case
    /// insensitive.
    pub async fn cached_by_genre(&self, genre: &str) -> Vec<MediaRecord> {
        let hits = self.cache.search_genre(genre).await;
        LogContext::search_operation(genre, Some(MediaSource::Local.as_str()), Some(hits.len()));
        hits
    }

    fn live_provider(&self, source: MediaSource) -> CatalogResult<Arc<dyn MediaProvider>> {
        self.by_source.get(&source).cloned().ok_or_else(|| {
            CatalogError::Unsupported(format!("No adapter registered for source {}", source))
        })
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = CatalogResult<T>>,
        source: MediaSource,
    ) -> CatalogResult<T> {
        match timeout(self.provider_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::ProviderUnavailable(format!(
                "Provider {} timed out",
                source
            ))),
        }
    }

    /// Write-through policy for everything a search or listing returned:
    /// first write wins, later sightings of the same key are no-ops, and a
    /// failed write only costs this record its cache entry, never the
    /// operation.
    async fn cache_if_absent(&self, records: &[MediaRecord]) {
        for record in records {
            let key = record.cache_key();
            match self.cache.upsert_if_absent(&key, record.clone()).await {
                Ok(true) => LogContext::cache_operation("upsert", &key, "written"),
                Ok(false) => LogContext::cache_operation("upsert", &key, "already present"),
                Err(e) => {
                    LogContext::error_with_context(
                        &e,
                        &format!("Cache write failed for key '{}'", key),
                    );
                }
            }
        }
    }
}
