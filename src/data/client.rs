//! RapidAPI movie database client
//!
//! This module provides the `MovieApi` seam the controllers talk to and the
//! reqwest-backed `MovieClient` that implements it against the two remote
//! endpoints: the filtered movie list and the single-movie detail.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::{Movie, SearchParams};

/// Default RapidAPI host for the movie database
pub const DEFAULT_API_HOST: &str = "movie-database-api1.p.rapidapi.com";

/// Default timeout applied to every outbound request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Path of the filtered list endpoint
const LIST_MOVIES_PATH: &str = "/list_movies.json";

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-RapidAPI-Key";

/// Header carrying the API host
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Errors that can occur when talking to the movie API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status attached to the error, if there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request(err) => err.status().map(|status| status.as_u16()),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Parse(_) => None,
        }
    }
}

/// The two remote operations the browser depends on
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Fetches the movie list matching `params`, in the order the API returns it
    async fn list_movies(&self, params: &SearchParams) -> Result<Vec<Movie>, ApiError>;

    /// Fetches the full record for one movie
    ///
    /// Returns `Ok(None)` when the call succeeds but carries no movie.
    async fn movie_details(&self, id: u64) -> Result<Option<Movie>, ApiError>;
}

/// Connection settings for `MovieClient`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// RapidAPI key; requests are still sent without one
    pub api_key: Option<String>,
    pub api_host: String,
    /// Overrides `https://{api_host}`
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Base URL requests are sent to, without a trailing slash
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.api_host),
        }
    }
}

/// Client for the RapidAPI movie database
#[derive(Debug, Clone)]
pub struct MovieClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    api_host: String,
}

impl MovieClient {
    /// Creates a client with the given settings
    ///
    /// # Returns
    /// * `Ok(MovieClient)` on success
    /// * `Err(ApiError::Request)` if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            base_url: config.resolved_base_url(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET with the API headers and decodes the body as JSON
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        info!(url = %url, "requesting");

        let mut request = self
            .http_client
            .get(&url)
            .query(query)
            .header(API_HOST_HEADER, &self.api_host);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|err| {
            warn!(url = %url, error = %err, "network error");
            ApiError::Request(err)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), body = %text, "API error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|err| {
            warn!(url = %url, error = %err, "malformed response body");
            ApiError::Parse(err)
        })
    }
}

#[async_trait]
impl MovieApi for MovieClient {
    async fn list_movies(&self, params: &SearchParams) -> Result<Vec<Movie>, ApiError> {
        let body = self.get_json(LIST_MOVIES_PATH, &params.pairs()).await?;
        parse_movie_list(&body)
    }

    async fn movie_details(&self, id: u64) -> Result<Option<Movie>, ApiError> {
        let body = self.get_json(&format!("/movie/{}", id), &[]).await?;
        parse_movie_detail(&body)
    }
}

/// Extracts `data.movies` from a list response
///
/// A missing or null level at any depth yields an empty list.
pub fn parse_movie_list(body: &Value) -> Result<Vec<Movie>, ApiError> {
    match body.pointer("/data/movies") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(movies) => Ok(serde_json::from_value(movies.clone())?),
    }
}

/// Extracts `movie` from a detail response
pub fn parse_movie_detail(body: &Value) -> Result<Option<Movie>, ApiError> {
    match body.get("movie") {
        None | Some(Value::Null) => Ok(None),
        Some(movie) => Ok(Some(serde_json::from_value(movie.clone())?)),
    }
}
