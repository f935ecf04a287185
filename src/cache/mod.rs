//! Cache module for API responses
//!
//! Search results and movie details are kept in memory for the whole
//! session. Nothing is written to disk, so a restart starts cold.

mod manager;

pub use manager::{CachedData, SessionCache};
