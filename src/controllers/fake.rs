//! Scripted `MovieApi` for tests
//!
//! Shared by the library's controller tests and the binary's app, fetch and
//! renderer tests, so it names the library by crate name.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use beatvideo::data::{ApiError, Movie, MovieApi, SearchParams};

/// Canned answer for one endpoint
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(ApiError::Status {
                status: *status,
                body: String::new(),
            }),
            Reply::Malformed => Err(ApiError::Parse(
                serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err(),
            )),
        }
    }
}

/// Answers each endpoint with a scripted `Reply` and counts the calls
///
/// Unscripted ids answer `Ok(None)` and the list defaults to empty.
pub struct FakeApi {
    list_reply: Mutex<Reply<Vec<Movie>>>,
    detail_replies: Mutex<HashMap<u64, Reply<Option<Movie>>>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            list_reply: Mutex::new(Reply::Ok(Vec::new())),
            detail_replies: Mutex::new(HashMap::new()),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Every list call answers with `movies`
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self::new().with_list(Reply::Ok(movies))
    }

    pub fn with_list(self, reply: Reply<Vec<Movie>>) -> Self {
        self.set_list(reply);
        self
    }

    pub fn with_detail(self, id: u64, reply: Reply<Option<Movie>>) -> Self {
        self.detail_replies.lock().unwrap().insert(id, reply);
        self
    }

    /// Scripts `movie` as the detail record for its own id
    pub fn with_record(self, movie: Movie) -> Self {
        match movie.id {
            Some(id) => self.with_detail(id, Reply::Ok(Some(movie))),
            None => self,
        }
    }

    pub fn set_list(&self, reply: Reply<Vec<Movie>>) {
        *self.list_reply.lock().unwrap() = reply;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn list_movies(&self, _params: &SearchParams) -> Result<Vec<Movie>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_reply.lock().unwrap().produce()
    }

    async fn movie_details(&self, id: u64) -> Result<Option<Movie>, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail_replies
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or(Reply::Ok(None))
            .produce()
    }
}

/// A list entry with only summary fields
pub fn movie(id: u64, title: &str, rating: f64) -> Movie {
    Movie {
        id: Some(id),
        title: title.to_string(),
        year: Some(2000 + (id % 25) as u32),
        rating: Some(rating),
        genres: Some(vec!["Drama".to_string()]),
        ..Movie::default()
    }
}

/// A record with every detail field filled in
pub fn detailed(id: u64, title: &str) -> Movie {
    Movie {
        summary: Some(format!("{title} plot")),
        runtime: Some(104),
        download_count: Some(2500),
        like_count: Some(77),
        language: Some("en".to_string()),
        mpa_rating: Some("R".to_string()),
        ..movie(id, title, 8.8)
    }
}
