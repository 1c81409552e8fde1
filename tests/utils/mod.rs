//! Shared helpers for the integration suite: record builders, a scriptable
//! stub provider, and a write-counting cache wrapper.

use async_trait::async_trait;
use medley::{
    CacheStore, CatalogError, CatalogResult, MediaDetails, MediaKind, MediaProvider, MediaRecord,
    MediaSource,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub fn anime_record(id: &str, title: &str, rating: f64) -> MediaRecord {
    MediaRecord {
        id: id.to_string(),
        source: MediaSource::Mal,
        title: title.to_string(),
        description: format!("{} synopsis", title),
        genres: vec!["Action".to_string()],
        rating,
        release_date: "Apr 3, 2023 to ?".to_string(),
        poster_url: None,
        backdrop_url: None,
        details: MediaDetails::Anime {
            episodes: Some(12),
            studios: vec!["Studio".to_string()],
            season: None,
            year: Some(2023),
            status: None,
        },
    }
}

pub fn movie_record(id: &str, title: &str, rating: f64) -> MediaRecord {
    MediaRecord {
        id: id.to_string(),
        source: MediaSource::Tmdb,
        title: title.to_string(),
        description: String::new(),
        genres: vec![],
        rating,
        release_date: "2020-01-01".to_string(),
        poster_url: None,
        backdrop_url: None,
        details: MediaDetails::Movie {
            runtime_minutes: Some(110),
            director: None,
            budget: None,
            revenue: None,
        },
    }
}

pub fn tv_record(id: &str, title: &str, rating: f64) -> MediaRecord {
    MediaRecord {
        id: id.to_string(),
        source: MediaSource::Tmdb,
        title: title.to_string(),
        description: String::new(),
        genres: vec![],
        rating,
        release_date: "2011-04-17".to_string(),
        poster_url: None,
        backdrop_url: None,
        details: MediaDetails::TvShow {
            seasons: Some(3),
            episodes: Some(30),
            networks: vec![],
            status: None,
        },
    }
}

/// In-process provider that serves a fixed record set, with a switch to
/// simulate the provider going down.
pub struct StubProvider {
    source: MediaSource,
    kinds: &'static [MediaKind],
    records: Vec<MediaRecord>,
    available: AtomicBool,
}

impl StubProvider {
    pub fn new(
        source: MediaSource,
        kinds: &'static [MediaKind],
        records: Vec<MediaRecord>,
    ) -> Arc<Self> {
        Arc::new(Self {
            source,
            kinds,
            records,
            available: AtomicBool::new(true),
        })
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> CatalogResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CatalogError::ProviderUnavailable(format!(
                "stub {} is down",
                self.source
            )))
        }
    }
}

#[async_trait]
impl MediaProvider for StubProvider {
    fn source(&self) -> MediaSource {
        self.source
    }

    fn kinds(&self) -> &'static [MediaKind] {
        self.kinds
    }

    async fn search_by_title(&self, query: &str, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        self.ensure_available()?;
        let needle = query.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> CatalogResult<Option<MediaRecord>> {
        self.ensure_available()?;
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn top_rated(&self, _page: u32, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        self.ensure_available()?;
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap());
        records.truncate(limit);
        Ok(records)
    }

    async fn latest(&self, _page: u32, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        self.ensure_available()?;
        let mut records = self.records.clone();
        records.truncate(limit);
        Ok(records)
    }
}

/// Cache wrapper that counts actual writes, for asserting the first-write-wins
/// policy issues exactly one write per distinct key.
pub struct CountingStore {
    inner: Arc<dyn CacheStore>,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn CacheStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            writes: AtomicUsize::new(0),
        })
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn get(&self, key: &str) -> CatalogResult<Option<MediaRecord>> {
        self.inner.get(key).await
    }

    async fn upsert(&self, key: &str, record: MediaRecord) -> CatalogResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert(key, record).await
    }

    async fn upsert_if_absent(&self, key: &str, record: MediaRecord) -> CatalogResult<bool> {
        let written = self.inner.upsert_if_absent(key, record).await?;
        if written {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(written)
    }

    async fn has(&self, key: &str) -> bool {
        self.inner.has(key).await
    }

    async fn remove(&self, key: &str) -> CatalogResult<bool> {
        self.inner.remove(key).await
    }

    async fn len(&self) -> usize {
        self.inner.len().await
    }

    async fn search_title(&self, query: &str) -> Vec<MediaRecord> {
        self.inner.search_title(query).await
    }

    async fn search_genre(&self, genre: &str) -> Vec<MediaRecord> {
        self.inner.search_genre(genre).await
    }
}

/// Cache whose medium is broken: every read and every write fails with a
/// storage error.
pub struct BrokenStore;

impl BrokenStore {
    fn failure(key: &str) -> CatalogError {
        CatalogError::Storage(format!("cache medium unavailable for '{}'", key))
    }
}

#[async_trait]
impl CacheStore for BrokenStore {
    async fn get(&self, key: &str) -> CatalogResult<Option<MediaRecord>> {
        Err(Self::failure(key))
    }

    async fn upsert(&self, key: &str, _record: MediaRecord) -> CatalogResult<()> {
        Err(Self::failure(key))
    }

    async fn upsert_if_absent(&self, key: &str, _record: MediaRecord) -> CatalogResult<bool> {
        Err(Self::failure(key))
    }

    async fn has(&self, _key: &str) -> bool {
        false
    }

    async fn remove(&self, key: &str) -> CatalogResult<bool> {
        Err(Self::failure(key))
    }

    async fn len(&self) -> usize {
        0
    }

    async fn search_title(&self, _query: &str) -> Vec<MediaRecord> {
        Vec::new()
    }

    async fn search_genre(&self, _genre: &str) -> Vec<MediaRecord> {
        Vec::new()
    }
}
