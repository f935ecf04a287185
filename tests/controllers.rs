//! Integration tests for the search and detail controllers
//!
//! The fake API answers with raw JSON bodies run through the same parsers the
//! HTTP client uses, so these tests cover decode, cache and classification
//! together.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use beatvideo::controllers::{DetailController, SearchController};
use beatvideo::data::client::{parse_movie_detail, parse_movie_list};
use beatvideo::data::{ApiError, Filter, Movie, MovieApi, SearchParams};
use beatvideo::error::ErrorKind;

/// Canned HTTP-level answer
#[derive(Clone)]
enum Response {
    Json(Value),
    Status(u16),
}

#[derive(Default)]
struct JsonApi {
    list: Mutex<Option<Response>>,
    details: Mutex<HashMap<u64, Response>>,
    seen_params: Mutex<Vec<SearchParams>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl JsonApi {
    fn list(response: Response) -> Arc<Self> {
        let api = Self::default();
        *api.list.lock().unwrap() = Some(response);
        Arc::new(api)
    }

    fn detail(id: u64, response: Response) -> Arc<Self> {
        let api = Self::default();
        api.details.lock().unwrap().insert(id, response);
        Arc::new(api)
    }
}

fn answer<T>(
    response: Option<Response>,
    parse: fn(&Value) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    match response.unwrap_or(Response::Json(json!({}))) {
        Response::Json(body) => parse(&body),
        Response::Status(status) => Err(ApiError::Status {
            status,
            body: "{\"message\":\"nope\"}".to_string(),
        }),
    }
}

#[async_trait]
impl MovieApi for JsonApi {
    async fn list_movies(&self, params: &SearchParams) -> Result<Vec<Movie>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_params.lock().unwrap().push(params.clone());
        let response = self.list.lock().unwrap().clone();
        answer(response, parse_movie_list)
    }

    async fn movie_details(&self, id: u64) -> Result<Option<Movie>, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.details.lock().unwrap().get(&id).cloned();
        answer(response, parse_movie_detail)
    }
}

fn two_movie_body() -> Value {
    json!({
        "status": "ok",
        "data": {
            "movie_count": 2,
            "movies": [
                {"id": 1, "title": "A", "year": 2001, "rating": 9.1, "genres": ["Drama"]},
                {"id": 2, "title": "B", "year": 1999, "rating": 9.0}
            ]
        }
    })
}

#[tokio::test]
async fn test_two_movie_response_is_returned_in_order() {
    let api = JsonApi::list(Response::Json(two_movie_body()));
    let search = SearchController::new(api.clone());

    let outcome = search.search(&Filter::new(Some("Drama"), 8.0)).await;

    let titles: Vec<&str> = outcome.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
    assert_eq!(outcome.movies[0].genres.as_deref(), Some(&["Drama".to_string()][..]));
    assert!(outcome.movies[1].genres.is_none());
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_empty_object_yields_empty_list() {
    let api = JsonApi::list(Response::Json(json!({})));
    let search = SearchController::new(api);

    let outcome = search.search(&Filter::default()).await;

    assert!(outcome.movies.is_empty());
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_equivalent_filters_share_one_request() {
    let api = JsonApi::list(Response::Json(two_movie_body()));
    let search = SearchController::new(api.clone());

    search.search(&Filter::new(Some("Drama"), 8.0)).await;
    let second = search.search(&Filter::new(Some("  Drama"), 8.02)).await;

    assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    assert!(second.from_cache);
    assert_eq!(second.movies.len(), 2);
}

#[tokio::test]
async fn test_request_carries_fixed_params() {
    let api = JsonApi::list(Response::Json(two_movie_body()));
    let search = SearchController::new(api.clone());

    search.search(&Filter::new(None, 7.5)).await;

    let seen = api.seen_params.lock().unwrap();
    let params = &seen[0];
    assert!(params.get("genre").is_none());
    assert_eq!(params.get("minimum_rating"), Some("7.5"));
    assert_eq!(params.get("sort_by"), Some("rating"));
    assert_eq!(params.get("order_by"), Some("desc"));
    assert_eq!(params.get("limit"), Some("10"));
}

#[tokio::test]
async fn test_rate_limited_list_is_not_cached() {
    let api = JsonApi::list(Response::Status(429));
    let search = SearchController::new(api.clone());
    let filter = Filter::default();

    let outcome = search.search(&filter).await;

    let error = outcome.error.expect("error expected");
    assert_eq!(error.kind, ErrorKind::RateLimited);
    assert!(error.message().contains("Too many requests"));
    assert!(!search.is_cached(&filter));

    search.search(&filter).await;
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_non_list_movies_field_is_fetch_failed() {
    let api = JsonApi::list(Response::Json(json!({"data": {"movies": "oops"}})));
    let search = SearchController::new(api);

    let outcome = search.search(&Filter::default()).await;

    assert_eq!(outcome.error.map(|e| e.kind), Some(ErrorKind::FetchFailed));
}

#[tokio::test]
async fn test_detail_fetched_once_and_merged() {
    let api = JsonApi::detail(
        7,
        Response::Json(json!({
            "movie": {
                "id": 7,
                "title": "Seven",
                "summary": "Detectives.",
                "download_count": 100,
                "like_count": 5,
                "runtime": 127,
                "language": "en"
            }
        })),
    );
    let details = DetailController::new(api.clone());
    let summary = Movie {
        id: Some(7),
        title: "Seven".to_string(),
        medium_cover_image: Some("seven.jpg".to_string()),
        ..Movie::default()
    };

    let first = details.ensure_detail(&summary, None).await;
    let second = details.ensure_detail(&summary, None).await;

    assert_eq!(api.detail_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.movie.runtime, Some(127));
    assert_eq!(first.movie.medium_cover_image.as_deref(), Some("seven.jpg"));
    assert!(second.from_cache);
    assert_eq!(second.movie, first.movie);
}

#[tokio::test]
async fn test_detail_status_classification() {
    for (status, kind) in [
        (403, ErrorKind::Forbidden),
        (429, ErrorKind::RateLimited),
        (502, ErrorKind::FetchFailed),
    ] {
        let api = JsonApi::detail(3, Response::Status(status));
        let details = DetailController::new(api);
        let summary = Movie {
            id: Some(3),
            title: "Three".to_string(),
            ..Movie::default()
        };

        let outcome = details.ensure_detail(&summary, None).await;

        assert_eq!(outcome.error.map(|e| e.kind), Some(kind), "status {status}");
        assert_eq!(outcome.movie.title, "Three");
        assert!(!details.is_cached(3));
    }
}

#[tokio::test]
async fn test_complete_summary_makes_no_call() {
    let api = Arc::new(JsonApi::default());
    let details = DetailController::new(api.clone());
    let summary = Movie {
        id: Some(1),
        title: "Done".to_string(),
        summary: Some("Already here".to_string()),
        download_count: Some(1),
        like_count: Some(1),
        runtime: Some(90),
        ..Movie::default()
    };

    let outcome = details.ensure_detail(&summary, None).await;

    assert_eq!(api.detail_calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.movie, summary);
}

#[tokio::test]
async fn test_detail_with_string_numbers_still_loads() {
    let api = JsonApi::detail(
        9,
        Response::Json(json!({
            "movie": {
                "id": 9,
                "title": "Nine",
                "year": "2001",
                "rating": "abc",
                "runtime": "88",
                "summary": "Strings everywhere.",
                "download_count": 4,
                "like_count": 2
            }
        })),
    );
    let details = DetailController::new(api);

    let outcome = details.ensure_detail(&Movie::default(), Some(9)).await;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.movie.year, Some(2001));
    assert_eq!(outcome.movie.runtime, Some(88));
    assert!(outcome.movie.rating.is_none());
    assert!(details.is_cached(9));
}

#[tokio::test]
async fn test_list_entry_with_bad_field_keeps_the_rest() {
    let api = JsonApi::list(Response::Json(json!({
        "data": {
            "movies": [
                {"id": 1, "title": "A", "year": "2001", "rating": 9.1},
                {"id": 2, "title": "B", "year": {"value": 1999}, "rating": 9.0}
            ]
        }
    })));
    let search = SearchController::new(api);

    let outcome = search.search(&Filter::default()).await;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.movies.len(), 2);
    assert_eq!(outcome.movies[0].year, Some(2001));
    assert!(outcome.movies[1].year.is_none());
}

#[tokio::test]
async fn test_null_movie_is_not_found() {
    let api = JsonApi::detail(8, Response::Json(json!({"movie": null})));
    let details = DetailController::new(api);

    let outcome = details
        .ensure_detail(&Movie::default(), Some(8))
        .await;

    let error = outcome.error.expect("error expected");
    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(error.message(), "Movie not found.");
    assert!(!details.is_cached(8));
}
