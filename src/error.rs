//! User-facing error taxonomy
//!
//! Every remote-call failure is converted at the controller boundary into a
//! `FetchError`, which carries the kind of failure and the flow it happened in.
//! The flow decides the fixed message shown to the user.

use thiserror::Error;

use crate::data::ApiError;

/// Which fetch flow produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Movie list search
    Search,
    /// Single-movie detail lookup
    Detail,
}

/// Classified failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API answered with HTTP 429
    RateLimited,
    /// The API answered with HTTP 403 (detail flow only)
    Forbidden,
    /// Any other failure: network, non-2xx status, malformed body, timeout
    FetchFailed,
    /// The call succeeded but the payload was empty
    NotFound,
}

/// How loudly an error should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Softer styling, the user only needs to wait
    Warning,
    Error,
}

/// An error surfaced to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", message_for(.kind, .flow))]
pub struct FetchError {
    pub kind: ErrorKind,
    pub flow: Flow,
}

impl FetchError {
    pub fn new(kind: ErrorKind, flow: Flow) -> Self {
        Self { kind, flow }
    }

    /// Maps a transport-level error to a user-facing kind for the given flow.
    ///
    /// 429 is always `RateLimited`. 403 is `Forbidden` only in the detail flow;
    /// the search flow reports it as a generic failure.
    pub fn classify(flow: Flow, error: &ApiError) -> Self {
        let kind = match (flow, error.status()) {
            (_, Some(429)) => ErrorKind::RateLimited,
            (Flow::Detail, Some(403)) => ErrorKind::Forbidden,
            _ => ErrorKind::FetchFailed,
        };
        Self::new(kind, flow)
    }

    /// Fixed message shown to the user
    pub fn message(&self) -> &'static str {
        message_for(&self.kind, &self.flow)
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            ErrorKind::RateLimited => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

fn message_for(kind: &ErrorKind, flow: &Flow) -> &'static str {
    match (kind, flow) {
        (ErrorKind::RateLimited, Flow::Search) => {
            "Too many requests. Please try again in a few minutes."
        }
        (ErrorKind::RateLimited, Flow::Detail) => {
            "Detail query limit exceeded (429). Please wait a moment and try again."
        }
        (ErrorKind::Forbidden, _) => "API access denied (403). Check your RapidAPI key and plan.",
        (ErrorKind::FetchFailed, Flow::Search) => {
            "Something went wrong while loading movies. Please try again later."
        }
        (ErrorKind::FetchFailed, Flow::Detail) => "Movie details could not be loaded.",
        (ErrorKind::NotFound, Flow::Search) => "No movies found.",
        (ErrorKind::NotFound, Flow::Detail) => "Movie not found.",
    }
}
