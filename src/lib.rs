//! beatvideo library
//!
//! Data models, the RapidAPI client, the session caches and the two
//! fetch-and-cache controllers. The terminal UI lives in the binary.

// Lets code shared with the binary's tests name the library as `beatvideo`
extern crate self as beatvideo;

pub mod cache;
pub mod cli;
pub mod controllers;
pub mod data;
pub mod error;
pub mod logging;
