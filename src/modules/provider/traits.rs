use crate::modules::media::{MediaKind, MediaRecord, MediaSource};
use crate::shared::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;

/// Capability set every external source is wrapped behind.
///
/// An adapter binds to exactly one [`MediaSource`] and is a pure network/IO
/// boundary: it must never touch the cache store, and it performs no retries
/// of its own (request pacing inside the transport is allowed). Adapters emit
/// this crate's domain records only, never provider-native shapes, and result
/// ordering is whatever the provider returned.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// The source this adapter serves.
    fn source(&self) -> MediaSource;

    /// Kinds this adapter can emit, in the source's cache probe order.
    fn kinds(&self) -> &'static [MediaKind];

    /// Title search. Errors classify as unavailable, rate limited, or
    /// malformed response.
    async fn search_by_title(&self, query: &str, limit: usize)
        -> CatalogResult<Vec<MediaRecord>>;

    /// Point lookup by native id. `Ok(None)` means the provider answered and
    /// has no such record; `Err` means the provider could not answer.
    async fn get_by_id(&self, id: &str) -> CatalogResult<Option<MediaRecord>>;

    /// Top rated listing (optional - not all sources offer one).
    async fn top_rated(&self, _page: u32, _limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        Err(CatalogError::Unsupported(format!(
            "top rated listing not supported by {}",
            self.source()
        )))
    }

    /// Latest/currently-running listing (optional).
    async fn latest(&self, _page: u32, _limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        Err(CatalogError::Unsupported(format!(
            "latest listing not supported by {}",
            self.source()
        )))
    }
}
