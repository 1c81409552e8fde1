use crate::modules::media::{MediaKind, MediaRecord, MediaSource};
use crate::modules::provider::{MediaProvider, ProviderHttpClient};
use crate::shared::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;

use super::mapper::TmdbMapper;
use super::models::{TmdbMovie, TmdbPage, TmdbTvShow};

/// The Movie Database adapter. Serves movies and TV shows, which TMDB ids
/// from two independent numeric spaces; the kind order here (movie before
/// TV) is also the cache probe order for hint-less lookups.
pub struct TmdbAdapter {
    http_client: ProviderHttpClient,
    base_url: String,
    api_key: String,
    mapper: TmdbMapper,
}

impl TmdbAdapter {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: ProviderHttpClient::for_tmdb(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key,
            mapper: TmdbMapper::new(),
        }
    }

    /// Point the adapter at a different base URL (for testing).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            http_client: ProviderHttpClient::for_tmdb(),
            base_url: base_url.into(),
            api_key,
            mapper: TmdbMapper::new(),
        }
    }

    /// Build URL with API key and additional query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, endpoint, self.api_key);
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        url
    }

    async fn movie_page(&self, endpoint: &str, params: &[(&str, String)]) -> CatalogResult<Vec<MediaRecord>> {
        let page: TmdbPage<TmdbMovie> = self.http_client.get(&self.build_url(endpoint, params)).await?;
        Ok(page.results.into_iter().map(|m| self.mapper.map_movie(m)).collect())
    }

    async fn tv_page(&self, endpoint: &str, params: &[(&str, String)]) -> CatalogResult<Vec<MediaRecord>> {
        let page: TmdbPage<TmdbTvShow> = self.http_client.get(&self.build_url(endpoint, params)).await?;
        Ok(page.results.into_iter().map(|s| self.mapper.map_tv_show(s)).collect())
    }

    fn parse_id(&self, id: &str) -> CatalogResult<i64> {
        id.parse()
            .map_err(|_| CatalogError::InvalidInput(format!("Invalid TMDB id: {}", id)))
    }
}

#[async_trait]
impl MediaProvider for TmdbAdapter {
    fn source(&self) -> MediaSource {
        MediaSource::Tmdb
    }

    fn kinds(&self) -> &'static [MediaKind] {
        &[MediaKind::Movie, MediaKind::TvShow]
    }

    /// Searches both the movie and the TV index; movies first, each block in
    /// TMDB's own relevance order.
    async fn search_by_title(
        &self,
        query: &str,
        limit: usize,
    ) -> CatalogResult<Vec<MediaRecord>> {
        log::info!("TMDB: Searching for '{}' (limit: {})", query, limit);

        let params = [("query", query.to_string())];
        let mut movies = self.movie_page("/search/movie", &params).await?;
        let mut shows = self.tv_page("/search/tv", &params).await?;

        movies.truncate(limit);
        shows.truncate(limit);

        log::info!(
            "TMDB: Found {} movies and {} TV shows for '{}'",
            movies.len(),
            shows.len(),
            query
        );

        movies.append(&mut shows);
        Ok(movies)
    }

    /// Tries the movie id space first, then TV, mirroring `kinds()` order.
    async fn get_by_id(&self, id: &str) -> CatalogResult<Option<MediaRecord>> {
        let tmdb_id = self.parse_id(id)?;

        log::info!("TMDB: Getting record by id '{}'", id);

        let movie_url = self.build_url(&format!("/movie/{}", tmdb_id), &[]);
        match self.http_client.get::<TmdbMovie>(&movie_url).await {
            Ok(movie) => return Ok(Some(self.mapper.map_movie(movie))),
            Err(CatalogError::NotFound(_)) => {
                log::debug!("TMDB: No movie with id '{}', trying TV", id)
            }
            Err(e) => return Err(e),
        }

        let tv_url = self.build_url(&format!("/tv/{}", tmdb_id), &[]);
        match self.http_client.get::<TmdbTvShow>(&tv_url).await {
            Ok(show) => Ok(Some(self.mapper.map_tv_show(show))),
            Err(CatalogError::NotFound(_)) => {
                log::info!("TMDB: No record found for id '{}'", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn top_rated(&self, page: u32, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        let params = [("page", page.to_string())];
        let mut movies = self.movie_page("/movie/top_rated", &params).await?;
        let mut shows = self.tv_page("/tv/top_rated", &params).await?;

        movies.truncate(limit);
        shows.truncate(limit);
        movies.append(&mut shows);
        Ok(movies)
    }

    async fn latest(&self, page: u32, limit: usize) -> CatalogResult<Vec<MediaRecord>> {
        let params = [("page", page.to_string())];
        let mut movies = self.movie_page("/movie/now_playing", &params).await?;
        let mut shows = self.tv_page("/tv/on_the_air", &params).await?;

        movies.truncate(limit);
        shows.truncate(limit);
        movies.append(&mut shows);
        Ok(movies)
    }
}
