//! Core data models for the movie browser
//!
//! This module contains the movie record shared by the list and detail
//! endpoints, the search filter, and the canonical request parameters
//! derived from it.

pub mod client;
pub mod genres;

pub use client::{ApiError, ClientConfig, MovieApi, MovieClient};
pub use genres::{all_genres, find_genre, DEFAULT_GENRE, DEFAULT_MIN_RATING};

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Fixed sort field for list requests
pub const SORT_BY: &str = "rating";

/// Fixed sort order for list requests
pub const ORDER_BY: &str = "desc";

/// Fixed number of results per list request
pub const RESULT_LIMIT: u32 = 10;

/// A movie record
///
/// The list endpoint returns a summary (id, title, year, rating, genres and
/// sometimes runtime and cover); the detail endpoint returns a superset.
/// Both decode into this type, with absent fields left as `None`. A field of
/// the wrong JSON type is also `None` instead of failing the whole record;
/// numbers sent as strings are parsed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Movie {
    /// Movie identifier used by the detail endpoint
    #[serde(default, deserialize_with = "lenient_number")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year: Option<u32>,
    /// IMDb rating (0-10)
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "or_none")]
    pub genres: Option<Vec<String>>,
    /// Runtime in minutes
    #[serde(default, deserialize_with = "lenient_number")]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "or_none")]
    pub medium_cover_image: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub download_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "or_none")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub mpa_rating: Option<String>,
}

/// Null or any non-string, non-number title decodes as empty
fn lenient_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(title) => title,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// Accepts a JSON number or a numeric string; anything else is `None`
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text.trim().parse().ok(),
        other => serde_json::from_value(other).ok(),
    })
}

fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

impl Movie {
    /// Whether any field that only the detail endpoint guarantees is absent
    pub fn missing_detail_fields(&self) -> bool {
        self.summary.is_none()
            || self.download_count.is_none()
            || self.like_count.is_none()
            || self.runtime.is_none()
    }

    /// Returns a copy of `self` with every field present in `detail` laid on top
    ///
    /// Fields the detail record lacks keep their summary value, so nothing the
    /// list already showed is lost.
    pub fn overlay(&self, detail: &Movie) -> Movie {
        fn pick<T: Clone>(top: &Option<T>, base: &Option<T>) -> Option<T> {
            top.as_ref().or(base.as_ref()).cloned()
        }

        Movie {
            id: pick(&detail.id, &self.id),
            title: if detail.title.is_empty() {
                self.title.clone()
            } else {
                detail.title.clone()
            },
            year: pick(&detail.year, &self.year),
            rating: pick(&detail.rating, &self.rating),
            genres: pick(&detail.genres, &self.genres),
            runtime: pick(&detail.runtime, &self.runtime),
            medium_cover_image: pick(&detail.medium_cover_image, &self.medium_cover_image),
            summary: pick(&detail.summary, &self.summary),
            download_count: pick(&detail.download_count, &self.download_count),
            like_count: pick(&detail.like_count, &self.like_count),
            language: pick(&detail.language, &self.language),
            mpa_rating: pick(&detail.mpa_rating, &self.mpa_rating),
        }
    }

    /// Genres joined for display, if any
    pub fn genres_label(&self) -> Option<String> {
        self.genres
            .as_ref()
            .filter(|genres| !genres.is_empty())
            .map(|genres| genres.join(", "))
    }
}

/// Clamps a rating into `[0, 10]` and rounds it to one decimal place
///
/// Non-finite input becomes `0`.
pub fn normalize_rating(rating: f64) -> f64 {
    if !rating.is_finite() {
        return 0.0;
    }
    (rating.clamp(0.0, 10.0) * 10.0).round() / 10.0
}

/// Criteria for a movie list search
///
/// Immutable once constructed; sort, order and limit are fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    genre: Option<String>,
    minimum_rating: f64,
}

impl Filter {
    /// Creates a filter, dropping a blank genre and normalizing the rating
    pub fn new(genre: Option<&str>, minimum_rating: f64) -> Self {
        let genre = genre
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);
        Self {
            genre,
            minimum_rating: normalize_rating(minimum_rating),
        }
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn minimum_rating(&self) -> f64 {
        self.minimum_rating
    }

    /// Builds the canonical request parameters for this filter
    pub fn params(&self) -> SearchParams {
        let mut params = BTreeMap::new();
        if let Some(genre) = &self.genre {
            params.insert("genre", genre.clone());
        }
        params.insert("minimum_rating", self.minimum_rating.to_string());
        params.insert("sort_by", SORT_BY.to_string());
        params.insert("order_by", ORDER_BY.to_string());
        params.insert("limit", RESULT_LIMIT.to_string());
        SearchParams { params }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new(Some(DEFAULT_GENRE), DEFAULT_MIN_RATING)
    }
}

/// Query parameters for the list endpoint, kept sorted by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    params: BTreeMap<&'static str, String>,
}

impl SearchParams {
    /// Looks up a single parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parameters as query pairs, sorted by name
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect()
    }

    /// Canonical cache key: the parameters as a JSON object with sorted keys
    ///
    /// Identical parameter sets always produce the same key, independent of
    /// how the originating filter was assembled.
    pub fn cache_key(&self) -> String {
        let object: Map<String, Value> = self
            .params
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.clone())))
            .collect();
        Value::Object(object).to_string()
    }
}
