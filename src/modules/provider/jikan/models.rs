//! Wire models for the Jikan v4 REST API, limited to the fields we map.

use serde::Deserialize;

/// List envelope (`/anime?q=`, `/top/anime`, `/seasons/now`).
#[derive(Debug, Deserialize)]
pub struct JikanList<T> {
    pub data: Vec<T>,
}

/// Single-item envelope (`/anime/{id}`).
#[derive(Debug, Deserialize)]
pub struct JikanItem<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u32,
    pub title: String,
    pub synopsis: Option<String>,
    pub score: Option<f64>,
    pub episodes: Option<u32>,
    #[serde(default)]
    pub genres: Vec<JikanNamed>,
    #[serde(default)]
    pub studios: Vec<JikanNamed>,
    pub images: Option<JikanImages>,
    pub aired: Option<JikanAired>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanNamed {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAired {
    /// Human-readable range, e.g. "Apr 3, 2023 to ?". Kept provider-native.
    pub string: Option<String>,
}
