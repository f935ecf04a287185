//! Fetch-and-cache controllers
//!
//! The search controller owns the "list movies by filter" flow and the
//! detail controller owns the "fill in one movie" flow. Both split their
//! work into a synchronous lookup that answers from the session cache and a
//! pending fetch that can be awaited elsewhere, so callers can mark a flow
//! as loading without blocking.
//!
//! Each lookup takes a ticket from a counter. A fetch that resolves after a
//! newer lookup reports itself as superseded so its result can be ignored.

pub mod detail;
pub mod search;

#[cfg(test)]
pub(crate) mod fake;

pub use detail::{DetailController, DetailOutcome, DetailStep, PendingDetail};
pub use search::{PendingSearch, SearchController, SearchOutcome, SearchStep};
