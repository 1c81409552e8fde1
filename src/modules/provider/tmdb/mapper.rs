use crate::modules::media::{MediaDetails, MediaRecord, MediaSource};

use super::models::{TmdbMovie, TmdbTvShow};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Maps TMDB wire models into domain records.
pub struct TmdbMapper;

impl TmdbMapper {
    pub fn new() -> Self {
        Self
    }

    /// Build a full image URL from a TMDB image path and size class.
    pub fn build_image_url(&self, path: &str, size: &str) -> String {
        format!("{}/{}{}", IMAGE_BASE, size, path)
    }

    fn poster(&self, path: Option<String>) -> Option<String> {
        path.map(|p| self.build_image_url(&p, "w500"))
    }

    fn backdrop(&self, path: Option<String>) -> Option<String> {
        path.map(|p| self.build_image_url(&p, "original"))
    }

    pub fn map_movie(&self, movie: TmdbMovie) -> MediaRecord {
        MediaRecord {
            id: movie.id.to_string(),
            source: MediaSource::Tmdb,
            title: movie.title,
            description: movie.overview.unwrap_or_default(),
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
            rating: movie.vote_average.unwrap_or(0.0),
            release_date: movie.release_date.unwrap_or_default(),
            poster_url: self.poster(movie.poster_path),
            backdrop_url: self.backdrop(movie.backdrop_path),
            details: MediaDetails::Movie {
                runtime_minutes: movie.runtime,
                director: None,
                budget: movie.budget,
                revenue: movie.revenue,
            },
        }
    }

    pub fn map_tv_show(&self, show: TmdbTvShow) -> MediaRecord {
        MediaRecord {
            id: show.id.to_string(),
            source: MediaSource::Tmdb,
            title: show.name,
            description: show.overview.unwrap_or_default(),
            genres: show.genres.into_iter().map(|g| g.name).collect(),
            rating: show.vote_average.unwrap_or(0.0),
            release_date: show.first_air_date.unwrap_or_default(),
            poster_url: self.poster(show.poster_path),
            backdrop_url: self.backdrop(show.backdrop_path),
            details: MediaDetails::TvShow {
                seasons: show.number_of_seasons,
                episodes: show.number_of_episodes,
                networks: show.networks.into_iter().map(|n| n.name).collect(),
                status: show.status,
            },
        }
    }
}

impl Default for TmdbMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::MediaKind;
    use serde_json::json;

    #[test]
    fn builds_image_urls() {
        let mapper = TmdbMapper::new();
        assert_eq!(
            mapper.build_image_url("/test.jpg", "original"),
            "https://image.tmdb.org/t/p/original/test.jpg"
        );
        assert_eq!(
            mapper.build_image_url("/test.jpg", "w500"),
            "https://image.tmdb.org/t/p/w500/test.jpg"
        );
    }

    #[test]
    fn maps_movie_detail_payload() {
        let movie: TmdbMovie = serde_json::from_value(json!({
            "id": 550,
            "title": "Fight Club",
            "overview": "An insomniac office worker...",
            "vote_average": 8.4,
            "release_date": "1999-10-15",
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "genres": [{"name": "Drama"}],
            "runtime": 139,
            "budget": 63000000u64,
            "revenue": 100853753u64
        }))
        .unwrap();

        let record = TmdbMapper::new().map_movie(movie);

        assert_eq!(record.id, "550");
        assert_eq!(record.source, MediaSource::Tmdb);
        assert_eq!(record.kind(), MediaKind::Movie);
        assert_eq!(record.release_date, "1999-10-15");
        assert_eq!(
            record.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        match record.details {
            MediaDetails::Movie { runtime_minutes, budget, .. } => {
                assert_eq!(runtime_minutes, Some(139));
                assert_eq!(budget, Some(63000000));
            }
            _ => panic!("expected movie details"),
        }
    }

    #[test]
    fn maps_tv_search_payload_without_detail_fields() {
        let show: TmdbTvShow = serde_json::from_value(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "overview": "Seven noble families...",
            "vote_average": 8.3,
            "first_air_date": "2011-04-17"
        }))
        .unwrap();

        let record = TmdbMapper::new().map_tv_show(show);

        assert_eq!(record.id, "1399");
        assert_eq!(record.kind(), MediaKind::TvShow);
        assert!(record.poster_url.is_none());
        match record.details {
            MediaDetails::TvShow { seasons, ref networks, .. } => {
                assert_eq!(seasons, None);
                assert!(networks.is_empty());
            }
            _ => panic!("expected tv details"),
        }
    }
}
