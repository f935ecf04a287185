//! UI rendering module for beatvideo
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod film_overlay;
pub mod help_overlay;
pub mod movie_detail;
pub mod movie_list;
pub mod theme;

pub use film_overlay::render as render_film_overlay;
pub use help_overlay::render as render_help_overlay;
pub use movie_detail::render as render_movie_detail;
pub use movie_list::render as render_movie_list;
