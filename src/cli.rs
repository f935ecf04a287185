//! Command-line interface parsing for beatvideo
//!
//! This module handles parsing of CLI arguments using clap: the initial
//! search filter, an optional movie to open directly, and the RapidAPI
//! connection settings.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::client::DEFAULT_API_HOST;
use crate::data::{find_genre, ClientConfig, Filter, DEFAULT_GENRE};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified genre name is not recognized
    #[error("Invalid genre: '{0}'. Use a genre from the list (e.g. Drama, Comedy) or 'any'")]
    InvalidGenre(String),
    /// The request timeout must be at least one second
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// beatvideo - Browse top-rated movies by genre from the terminal
#[derive(Parser, Debug)]
#[command(name = "beatvideo")]
#[command(about = "Browse top-rated movies by genre and rating")]
#[command(version)]
pub struct Cli {
    /// Genre for the initial search, or 'any' for all genres
    ///
    /// Examples:
    ///   beatvideo --genre drama
    ///   beatvideo --genre any --min-rating 8.5
    #[arg(long, value_name = "GENRE", default_value = DEFAULT_GENRE)]
    pub genre: String,

    /// Minimum IMDb rating for the initial search (0-10)
    #[arg(long, value_name = "RATING", default_value_t = 9.0, value_parser = parse_rating)]
    pub min_rating: f64,

    /// Open the detail page for this movie id instead of searching
    #[arg(long, value_name = "ID")]
    pub movie: Option<u64>,

    /// RapidAPI key sent with every request
    #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// RapidAPI host header value
    #[arg(long, env = "RAPIDAPI_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Override the API base URL (defaults to https://<api-host>)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 15)]
    pub timeout: u64,

    /// Write logs to this file instead of the default data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_rating(s: &str) -> Result<f64, String> {
    let rating: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !(0.0..=10.0).contains(&rating) {
        return Err(format!("rating must be between 0 and 10, got {rating}"));
    }
    Ok(rating)
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Filter for the first search
    pub filter: Filter,
    /// Movie whose detail page opens at startup
    pub open_movie: Option<u64>,
    pub client: ClientConfig,
    pub log_file: Option<PathBuf>,
}

/// Parses a genre argument.
///
/// # Returns
/// * `Ok(None)` for "any" or an empty string
/// * `Ok(Some(genre))` with the canonical spelling for a known genre
/// * `Err(CliError::InvalidGenre)` otherwise
pub fn parse_genre_arg(s: &str) -> Result<Option<&'static str>, CliError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    find_genre(trimmed)
        .map(Some)
        .ok_or_else(|| CliError::InvalidGenre(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the genre or timeout is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let genre = parse_genre_arg(&cli.genre)?;
        if cli.timeout == 0 {
            return Err(CliError::InvalidTimeout);
        }

        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(StartupConfig {
            filter: Filter::new(genre, cli.min_rating),
            open_movie: cli.movie,
            client: ClientConfig {
                api_key,
                api_host: cli.api_host.clone(),
                base_url: cli.base_url.clone(),
                timeout: Duration::from_secs(cli.timeout),
            },
            log_file: cli.log_file.clone(),
        })
    }
}
