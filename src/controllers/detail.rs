//! Detail cache controller
//!
//! Fills in a movie summary with the fields only the detail endpoint
//! returns. Each movie id is fetched at most once per session; later
//! requests are answered from the cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::SessionCache;
use crate::data::{Movie, MovieApi};
use crate::error::{ErrorKind, FetchError, Flow};

/// State of one detail lookup
#[derive(Debug, Clone)]
pub struct DetailOutcome {
    /// The summary, or the summary with detail fields laid on top
    pub movie: Movie,
    /// A fetch is still outstanding
    pub loading: bool,
    pub error: Option<FetchError>,
    pub from_cache: bool,
    /// A newer detail lookup started before this one resolved
    pub superseded: bool,
}

impl DetailOutcome {
    fn ready(movie: Movie, from_cache: bool) -> Self {
        Self {
            movie,
            loading: false,
            error: None,
            from_cache,
            superseded: false,
        }
    }
}

/// First phase of a detail lookup
pub enum DetailStep {
    /// Nothing to fetch: the summary is complete, has no id, or is cached
    Ready(DetailOutcome),
    /// The detail endpoint must be called
    Fetch(PendingDetail),
}

/// A detail request waiting to be sent
pub struct PendingDetail {
    api: Arc<dyn MovieApi>,
    cache: SessionCache<u64, Movie>,
    latest: Arc<AtomicU64>,
    summary: Movie,
    movie_id: u64,
    ticket: u64,
}

impl PendingDetail {
    pub fn movie_id(&self) -> u64 {
        self.movie_id
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// What to show while the fetch is in flight
    pub fn loading_outcome(&self) -> DetailOutcome {
        DetailOutcome {
            movie: self.summary.clone(),
            loading: true,
            error: None,
            from_cache: false,
            superseded: false,
        }
    }

    /// Calls the detail endpoint and merges the answer into the summary
    ///
    /// Only a present `movie` record is cached. On any failure the summary is
    /// returned unchanged together with the classified error.
    pub async fn run(self) -> DetailOutcome {
        let result = self.api.movie_details(self.movie_id).await;
        let superseded = self.latest.load(Ordering::SeqCst) != self.ticket;

        let (movie, error) = match result {
            Ok(Some(detail)) => {
                info!(movie_id = self.movie_id, superseded, "detail fetched");
                let merged = self.summary.overlay(&detail);
                self.cache.write(self.movie_id, detail);
                (merged, None)
            }
            Ok(None) => {
                warn!(movie_id = self.movie_id, "detail response had no movie");
                (self.summary, Some(FetchError::new(ErrorKind::NotFound, Flow::Detail)))
            }
            Err(err) => {
                let error = FetchError::classify(Flow::Detail, &err);
                warn!(movie_id = self.movie_id, error = %err, kind = ?error.kind, "detail failed");
                (self.summary, Some(error))
            }
        };

        DetailOutcome {
            movie,
            loading: false,
            error,
            from_cache: false,
            superseded,
        }
    }
}

/// Owns the "fill in one movie" flow and its cache
#[derive(Clone)]
pub struct DetailController {
    api: Arc<dyn MovieApi>,
    cache: SessionCache<u64, Movie>,
    latest: Arc<AtomicU64>,
}

impl DetailController {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            api,
            cache: SessionCache::new(),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Decides whether `summary` needs a detail fetch
    ///
    /// `movie_id` overrides the summary's own id, for pages opened by id
    /// before any summary is known.
    pub fn begin(&self, summary: &Movie, movie_id: Option<u64>) -> DetailStep {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if !summary.missing_detail_fields() {
            debug!(movie_id = ?summary.id, "detail skipped: summary already complete");
            return DetailStep::Ready(DetailOutcome::ready(summary.clone(), false));
        }

        let Some(movie_id) = movie_id.or(summary.id) else {
            debug!("detail skipped: no movie id");
            return DetailStep::Ready(DetailOutcome::ready(summary.clone(), false));
        };

        if let Some(cached) = self.cache.read(&movie_id) {
            debug!(movie_id, "detail cache hit");
            return DetailStep::Ready(DetailOutcome::ready(summary.overlay(&cached.data), true));
        }

        debug!(movie_id, "detail cache miss");
        DetailStep::Fetch(PendingDetail {
            api: Arc::clone(&self.api),
            cache: self.cache.clone(),
            latest: Arc::clone(&self.latest),
            summary: summary.clone(),
            movie_id,
            ticket,
        })
    }

    /// Runs a complete lookup: cache or completeness check first, then one detail request
    pub async fn ensure_detail(&self, summary: &Movie, movie_id: Option<u64>) -> DetailOutcome {
        match self.begin(summary, movie_id) {
            DetailStep::Ready(outcome) => outcome,
            DetailStep::Fetch(pending) => pending.run().await,
        }
    }

    pub fn is_cached(&self, movie_id: u64) -> bool {
        self.cache.contains(&movie_id)
    }
}
