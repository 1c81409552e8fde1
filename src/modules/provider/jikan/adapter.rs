use crate::modules::media::{MediaKind, MediaRecord, MediaSource};
use crate::modules::provider::{MediaProvider, ProviderHttpClient};
use crate::shared::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;

use super::mapper::JikanMapper;
use super::models::{JikanAnime, JikanItem, JikanList};

/// MyAnimeList adapter backed by the Jikan v4 REST API. Anime only.
pub struct JikanAdapter {
    http_client: ProviderHttpClient,
    base_url: String,
    mapper: JikanMapper,
}

impl JikanAdapter {
    pub fn new() -> Self {
        Self {
            http_client: ProviderHttpClient::for_jikan(),
            base_url: "https://api.jikan.moe/v4".to_string(),
            mapper: JikanMapper::new(),
        }
    }

    /// Point the adapter at a different base URL (for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: ProviderHttpClient::for_jikan(),
            base_url: base_url.into(),
            mapper: JikanMapper::new(),
        }
    }

    async fn fetch_list(&self, url: &str) -> CatalogResult<Vec<MediaRecord>> {
        let response: JikanList<JikanAnime> = self.http_client.get(url).await?;
        Ok(response
            .data
            .into_iter()
            .map(|anime| self.mapper.map_anime(anime))
            .collect())
    }
}

impl Default for JikanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaProvider for JikanAdapter {
    fn source(&self) -> MediaSource {
        MediaSource::Mal
    }

    fn kinds(&self) -> &'static [MediaKind] {
        &[MediaKind::Anime]
    }

    async fn search_by_title(
        &self,
        query: &str,
        limit: usize,
    ) -> CatalogResult<Vec<MediaRecord>> {
        let url = format!(
            "{}/anime?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );

        log::info!("Jikan: Searching for '{}' (limit: {})", query, limit);
        let records = self.fetch_list(&url).await?;
        log::info!("Jikan: Found {} results for '{}'", records.len(), query);
        Ok(records)
    }

    async fn get_by_id(&self, id: &str) -> CatalogResult<Option<MediaRecord>> {
        let anime_id: u32 = id
            .parse()
            .map_err(|_| CatalogError::InvalidInput(format!("Invalid MAL id: {}", id)))?;

        let url = format!("{}/anime/{}", self.base_url, anime_id);

        log::info!("Jikan: Getting anime by id '{}'", id);
        let response: JikanItem<JikanAnime> = match self.http_client.get(&url).await {
            Ok(response) => response,
            Err(CatalogError::NotFound(_)) => {
                log::info!("Jikan: No anime found for id '{}'", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(self.mapper.map_anime(response.data)))
    }

    async fn top_rated(&self, page: u32, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        let url = format!("{}/top/anime?page={}&limit={}", self.base_url, page, limit);
        self.fetch_list(&url).await
    }

    async fn latest(&self, page: u32, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        let url = format!("{}/seasons/now?page={}", self.base_url, page);
        let mut records = self.fetch_list(&url).await?;
        records.truncate(limit);
        Ok(records)
    }
}
