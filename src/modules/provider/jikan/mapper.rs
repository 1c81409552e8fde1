use crate::modules::media::{MediaDetails, MediaRecord, MediaSource};

use super::models::JikanAnime;

/// Maps Jikan wire models into domain records.
pub struct JikanMapper;

impl JikanMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_anime(&self, anime: JikanAnime) -> MediaRecord {
        let (poster_url, backdrop_url) = match anime.images.and_then(|i| i.jpg) {
            Some(jpg) => (jpg.image_url, jpg.large_image_url),
            None => (None, None),
        };

        MediaRecord {
            id: anime.mal_id.to_string(),
            source: MediaSource::Mal,
            title: anime.title,
            description: anime.synopsis.unwrap_or_default(),
            genres: anime.genres.into_iter().map(|g| g.name).collect(),
            rating: anime.score.unwrap_or(0.0),
            release_date: anime
                .aired
                .and_then(|a| a.string)
                .unwrap_or_default(),
            poster_url,
            backdrop_url,
            details: MediaDetails::Anime {
                episodes: anime.episodes,
                studios: anime.studios.into_iter().map(|s| s.name).collect(),
                season: anime.season,
                year: anime.year,
                status: anime.status,
            },
        }
    }
}

impl Default for JikanMapper {
    fn default() -> Self {
        Self::new()
    }
}
