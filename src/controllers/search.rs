//! Search cache controller
//!
//! Turns a `Filter` into canonical request parameters, answers repeat
//! searches from the session cache, and fetches the list endpoint otherwise.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cache::SessionCache;
use crate::data::{Filter, Movie, MovieApi, SearchParams};
use crate::error::{FetchError, Flow};

/// Result of one search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Movies in the order the API returned them; empty on error
    pub movies: Vec<Movie>,
    pub error: Option<FetchError>,
    /// Served from the session cache without a network call
    pub from_cache: bool,
    /// A newer search started before this one resolved
    pub superseded: bool,
    /// When the list was stored, if it was
    pub cached_at: Option<DateTime<Utc>>,
}

/// First phase of a search
pub enum SearchStep {
    /// Answered from the cache; no fetch needed
    Cached(SearchOutcome),
    /// Cache miss; the pending fetch must be run
    Fetch(PendingSearch),
}

/// A list request waiting to be sent
pub struct PendingSearch {
    api: Arc<dyn MovieApi>,
    cache: SessionCache<String, Vec<Movie>>,
    latest: Arc<AtomicU64>,
    params: SearchParams,
    key: String,
    ticket: u64,
}

impl PendingSearch {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn cache_key(&self) -> &str {
        &self.key
    }

    /// Issues the list request and stores a successful result
    ///
    /// Failures are classified and never cached.
    pub async fn run(self) -> SearchOutcome {
        let result = self.api.list_movies(&self.params).await;
        let superseded = self.latest.load(Ordering::SeqCst) != self.ticket;

        match result {
            Ok(movies) => {
                info!(key = %self.key, count = movies.len(), superseded, "search fetched");
                self.cache.write(self.key.clone(), movies.clone());
                SearchOutcome {
                    movies,
                    error: None,
                    from_cache: false,
                    superseded,
                    cached_at: Some(Utc::now()),
                }
            }
            Err(err) => {
                let error = FetchError::classify(Flow::Search, &err);
                warn!(key = %self.key, error = %err, kind = ?error.kind, "search failed");
                SearchOutcome {
                    movies: Vec::new(),
                    error: Some(error),
                    from_cache: false,
                    superseded,
                    cached_at: None,
                }
            }
        }
    }
}

/// Owns the "list movies by filter" flow and its cache
#[derive(Clone)]
pub struct SearchController {
    api: Arc<dyn MovieApi>,
    cache: SessionCache<String, Vec<Movie>>,
    latest: Arc<AtomicU64>,
}

impl SearchController {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            api,
            cache: SessionCache::new(),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Resolves `filter` from the cache or prepares a fetch
    ///
    /// Every call supersedes any fetch started by an earlier call.
    pub fn lookup(&self, filter: &Filter) -> SearchStep {
        let params = filter.params();
        let key = params.cache_key();
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(cached) = self.cache.read(key.as_str()) {
            debug!(key = %key, "search cache hit");
            return SearchStep::Cached(SearchOutcome {
                movies: cached.data,
                error: None,
                from_cache: true,
                superseded: false,
                cached_at: Some(cached.cached_at),
            });
        }

        debug!(key = %key, "search cache miss");
        SearchStep::Fetch(PendingSearch {
            api: Arc::clone(&self.api),
            cache: self.cache.clone(),
            latest: Arc::clone(&self.latest),
            params,
            key,
            ticket,
        })
    }

    /// Runs a complete search: cache first, then one list request
    pub async fn search(&self, filter: &Filter) -> SearchOutcome {
        match self.lookup(filter) {
            SearchStep::Cached(outcome) => outcome,
            SearchStep::Fetch(pending) => pending.run().await,
        }
    }

    /// Whether a search for `filter` would be served from the cache
    pub fn is_cached(&self, filter: &Filter) -> bool {
        self.cache.contains(filter.params().cache_key().as_str())
    }
}
