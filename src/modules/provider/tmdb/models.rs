//! Wire models for the TMDB v3 API, limited to the fields we map.
//!
//! Search listings omit detail fields (runtime, budget, networks); those stay
//! `None`/empty and only fill in on point lookups.

use serde::Deserialize;

/// Paged listing envelope (`/search/*`, `/*/top_rated`, ...).
#[derive(Debug, Deserialize)]
pub struct TmdbPage<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    pub runtime: Option<u32>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbTvShow {
    pub id: i64,
    pub name: String,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub networks: Vec<TmdbNetwork>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbNetwork {
    pub name: String,
}
