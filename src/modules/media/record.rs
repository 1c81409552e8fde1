use serde::{Deserialize, Serialize};

/// The media kind of a record. Fixed at creation, carried by every record
/// through its [`MediaDetails`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Anime,
    Movie,
    TvShow,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Anime => "anime",
            MediaKind::Movie => "movie",
            MediaKind::TvShow => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of a media record. Native ids are only unique within a source
/// (and, for multi-kind sources, within a source + kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    /// MyAnimeList, reached through the Jikan REST API. Emits anime only.
    Mal,
    /// The Movie Database. Emits movies and TV shows from one id space each.
    Tmdb,
    /// The local cache file itself.
    Local,
}

impl MediaSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSource::Mal => "mal",
            MediaSource::Tmdb => "tmdb",
            MediaSource::Local => "local",
        }
    }

    /// Kinds this source is known to emit, in cache probe priority order.
    /// Hint-less lookups walk this list and stop at the first cache hit.
    pub fn known_kinds(&self) -> &'static [MediaKind] {
        match self {
            MediaSource::Mal => &[MediaKind::Anime],
            MediaSource::Tmdb => &[MediaKind::Movie, MediaKind::TvShow],
            MediaSource::Local => &[MediaKind::Anime, MediaKind::Movie, MediaKind::TvShow],
        }
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind-specific attributes, tagged by the kind they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaDetails {
    Anime {
        episodes: Option<u32>,
        studios: Vec<String>,
        season: Option<String>,
        year: Option<i32>,
        status: Option<String>,
    },
    Movie {
        runtime_minutes: Option<u32>,
        director: Option<String>,
        budget: Option<u64>,
        revenue: Option<u64>,
    },
    TvShow {
        seasons: Option<u32>,
        episodes: Option<u32>,
        networks: Vec<String>,
        status: Option<String>,
    },
}

impl MediaDetails {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaDetails::Anime { .. } => MediaKind::Anime,
            MediaDetails::Movie { .. } => MediaKind::Movie,
            MediaDetails::TvShow { .. } => MediaKind::TvShow,
        }
    }
}

/// One item of catalog content from one source.
///
/// `id` is the source-native identifier and stays un-prefixed everywhere a
/// caller can see it; composite cache keys are a storage-internal detail.
/// `release_date` keeps the provider-native format and is not normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    pub source: MediaSource,
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
    /// Rating score (0.0 to 10.0).
    pub rating: f64,
    pub release_date: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    #[serde(flatten)]
    pub details: MediaDetails,
}

impl MediaRecord {
    pub fn kind(&self) -> MediaKind {
        self.details.kind()
    }

    /// Identity is (source, kind, native id). Field-level differences, like a
    /// refreshed rating, do not affect identity.
    pub fn same_identity(&self, other: &MediaRecord) -> bool {
        self.source == other.source && self.kind() == other.kind() && self.id == other.id
    }

    /// Composite key this record is stored under in the cache.
    pub fn cache_key(&self) -> String {
        super::cache_key(self.source, self.kind(), &self.id)
    }
}
