use crate::modules::media::MediaRecord;
use crate::shared::errors::CatalogResult;
use async_trait::async_trait;

/// Durable key-value contract the aggregator caches records through.
///
/// Keys are composite cache keys (see [`crate::modules::media::cache_key`]);
/// the store itself never interprets them. Absence is a normal outcome, not
/// an error: only medium failures surface as `CatalogError::Storage`. Once
/// `upsert` returns `Ok`, the record must survive a process restart.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a record. `Ok(None)` means a plain miss.
    async fn get(&self, key: &str) -> CatalogResult<Option<MediaRecord>>;

    /// Unconditionally write a record under `key`, overwriting any
    /// previous entry. Deciding *whether* to write is the caller's job.
    async fn upsert(&self, key: &str, record: MediaRecord) -> CatalogResult<()>;

    /// Write only if `key` has no entry yet. Atomic per key, so two
    /// concurrent callers can never both observe absence and both write.
    /// Returns whether a write happened.
    async fn upsert_if_absent(&self, key: &str, record: MediaRecord) -> CatalogResult<bool>;

    /// Whether `key` currently has an entry.
    async fn has(&self, key: &str) -> bool;

    /// Delete the entry under `key`. Returns whether one existed.
    async fn remove(&self, key: &str) -> CatalogResult<bool>;

    /// Number of cached records.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Case-insensitive title substring scan over all cached records.
    /// Serves the local-source search path; ordering is unspecified.
    async fn search_title(&self, query: &str) -> Vec<MediaRecord>;

    /// All cached records carrying `genre` (case-insensitive, whole-genre
    /// match). Ordering is unspecified.
    async fn search_genre(&self, genre: &str) -> Vec<MediaRecord>;
}
