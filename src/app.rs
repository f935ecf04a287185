//! Application state management for beatvideo
//!
//! This module contains the main application state, handling keyboard input,
//! turning user actions into fetch jobs, and applying finished fetches.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use beatvideo::cli::StartupConfig;
use beatvideo::controllers::{
    DetailController, DetailOutcome, DetailStep, SearchController, SearchOutcome, SearchStep,
};
use beatvideo::data::genres::genre_index;
use beatvideo::data::{all_genres, normalize_rating, Filter, Movie, MovieApi};
use beatvideo::error::FetchError;

use crate::fetch::{DetailTarget, FetchJob, FetchMessage};
use crate::ui::theme::Theme;

/// Step applied by `+` and `-` to the minimum rating
const RATING_STEP: f64 = 0.1;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the first search to finish
    Loading,
    /// Filter bar and result list
    MovieList,
    /// Full-screen detail page for a movie id
    MovieDetail(u64),
}

/// What the overlay or detail page currently shows
#[derive(Debug, Clone)]
pub struct DetailPanel {
    pub movie_id: Option<u64>,
    /// Best-available record: the summary until details arrive
    pub movie: Movie,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl DetailPanel {
    fn for_summary(summary: Movie) -> Self {
        Self {
            movie_id: summary.id,
            movie: summary,
            loading: false,
            error: None,
        }
    }

    fn for_id(movie_id: u64) -> Self {
        Self::for_summary(Movie {
            id: Some(movie_id),
            ..Movie::default()
        })
    }

    fn apply(&mut self, outcome: DetailOutcome) {
        self.movie = outcome.movie;
        self.loading = outcome.loading;
        self.error = outcome.error;
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    pub theme: Theme,
    /// Index into the genre choices; 0 is "Any"
    pub genre_index: usize,
    pub min_rating: f64,
    /// Results of the last successful search
    pub movies: Vec<Movie>,
    /// Index of currently selected movie in list view
    pub selected_index: usize,
    pub search_loading: bool,
    pub search_error: Option<FetchError>,
    /// Whether any search has completed successfully
    pub has_searched: bool,
    /// When the displayed results were fetched
    pub last_search: Option<DateTime<Utc>>,
    /// Film overlay on top of the list
    pub overlay: Option<DetailPanel>,
    /// Content of the full-screen detail page
    pub detail_page: Option<DetailPanel>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// A search should be started on the next tick
    pub search_requested: bool,
    /// A detail lookup should be started on the next tick
    pub detail_requested: Option<DetailTarget>,
    search: SearchController,
    details: DetailController,
}

impl App {
    /// Creates a new App that talks to `api`, with the default filter
    #[cfg(test)]
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self::with_startup_config(api, StartupConfig::default())
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// With `--movie` the detail page opens first and no search runs until
    /// the user returns to the list; otherwise the initial search is queued.
    pub fn with_startup_config(api: Arc<dyn MovieApi>, config: StartupConfig) -> Self {
        let genre_index = config
            .filter
            .genre()
            .and_then(genre_index)
            .map_or(0, |index| index + 1);

        let mut app = Self {
            state: AppState::Loading,
            theme: Theme::default(),
            genre_index,
            min_rating: config.filter.minimum_rating(),
            movies: Vec::new(),
            selected_index: 0,
            search_loading: false,
            search_error: None,
            has_searched: false,
            last_search: None,
            overlay: None,
            detail_page: None,
            should_quit: false,
            show_help: false,
            search_requested: true,
            detail_requested: None,
            search: SearchController::new(Arc::clone(&api)),
            details: DetailController::new(api),
        };

        if let Some(movie_id) = config.open_movie {
            app.open_detail_page(DetailPanel::for_id(movie_id), movie_id);
            app.search_requested = false;
        }

        app
    }

    /// Genre currently selected in the filter bar, `None` for "Any"
    pub fn current_genre(&self) -> Option<&'static str> {
        self.genre_index
            .checked_sub(1)
            .and_then(|index| all_genres().get(index).copied())
    }

    pub fn current_filter(&self) -> Filter {
        Filter::new(self.current_genre(), self.min_rating)
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies.get(self.selected_index)
    }

    /// Handles keyboard input based on current state
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggle();
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        if self.overlay.is_some() {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter) {
                self.overlay = None;
            }
            return;
        }

        match self.state {
            AppState::Loading | AppState::MovieList => self.handle_list_key(key_event.code),
            AppState::MovieDetail(_) => {
                if matches!(key_event.code, KeyCode::Esc | KeyCode::Backspace) {
                    self.close_detail_page();
                }
            }
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.previous_genre(),
            KeyCode::Right | KeyCode::Char('l') => self.next_genre(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_rating(RATING_STEP),
            KeyCode::Char('-') => self.adjust_rating(-RATING_STEP),
            KeyCode::Char('s') | KeyCode::Char('/') => self.search_requested = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter => {
                if let Some(summary) = self.selected_movie().cloned() {
                    self.overlay = Some(DetailPanel::for_summary(summary));
                    self.detail_requested = Some(DetailTarget::Overlay);
                }
            }
            KeyCode::Char('d') => {
                if let Some(summary) = self.selected_movie().cloned() {
                    if let Some(movie_id) = summary.id {
                        self.open_detail_page(DetailPanel::for_summary(summary), movie_id);
                    }
                }
            }
            _ => {}
        }
    }

    fn open_detail_page(&mut self, panel: DetailPanel, movie_id: u64) {
        self.detail_page = Some(panel);
        self.detail_requested = Some(DetailTarget::Page);
        self.state = AppState::MovieDetail(movie_id);
    }

    fn close_detail_page(&mut self) {
        self.detail_page = None;
        self.state = AppState::MovieList;
        if !self.has_searched && !self.search_loading {
            self.search_requested = true;
        }
    }

    fn genre_choices() -> usize {
        all_genres().len() + 1
    }

    fn next_genre(&mut self) {
        self.genre_index = (self.genre_index + 1) % Self::genre_choices();
    }

    fn previous_genre(&mut self) {
        self.genre_index = if self.genre_index == 0 {
            Self::genre_choices() - 1
        } else {
            self.genre_index - 1
        };
    }

    fn adjust_rating(&mut self, delta: f64) {
        self.min_rating = normalize_rating(self.min_rating + delta);
    }

    fn move_selection_up(&mut self) {
        let count = self.movies.len();
        if count > 0 {
            self.selected_index = if self.selected_index == 0 {
                count - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    fn move_selection_down(&mut self) {
        let count = self.movies.len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    /// Starts whatever the last key presses asked for
    ///
    /// Cache hits are applied immediately; misses come back as jobs for the
    /// caller to spawn.
    pub fn take_jobs(&mut self) -> Vec<FetchJob> {
        let mut jobs = Vec::new();

        if std::mem::take(&mut self.search_requested) {
            match self.search.lookup(&self.current_filter()) {
                SearchStep::Cached(outcome) => self.apply_search(outcome),
                SearchStep::Fetch(pending) => {
                    self.search_loading = true;
                    self.search_error = None;
                    jobs.push(FetchJob::Search(pending));
                }
            }
        }

        if let Some(target) = self.detail_requested.take() {
            let panel = match target {
                DetailTarget::Overlay => self.overlay.as_mut(),
                DetailTarget::Page => self.detail_page.as_mut(),
            };
            let Some(panel) = panel else {
                return jobs;
            };
            match self.details.begin(&panel.movie, panel.movie_id) {
                DetailStep::Ready(outcome) => panel.apply(outcome),
                DetailStep::Fetch(pending) => {
                    panel.apply(pending.loading_outcome());
                    jobs.push(FetchJob::Detail { target, pending });
                }
            }
        }

        jobs
    }

    fn panel_mut(&mut self, target: DetailTarget) -> Option<&mut DetailPanel> {
        match target {
            DetailTarget::Overlay => self.overlay.as_mut(),
            DetailTarget::Page => self.detail_page.as_mut(),
        }
    }

    /// Applies a finished fetch, dropping results nobody is waiting for
    pub fn apply(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::SearchFinished(outcome) => {
                if outcome.superseded {
                    debug!("ignoring superseded search result");
                    return;
                }
                self.apply_search(outcome);
            }
            FetchMessage::DetailFinished {
                target,
                movie_id,
                outcome,
            } => {
                if outcome.superseded {
                    debug!(movie_id, "ignoring superseded detail result");
                    return;
                }
                match self.panel_mut(target) {
                    Some(panel) if panel.movie_id == Some(movie_id) => panel.apply(outcome),
                    _ => debug!(movie_id, "ignoring detail result for a closed view"),
                }
            }
        }
    }

    fn apply_search(&mut self, outcome: SearchOutcome) {
        self.search_loading = false;
        match outcome.error {
            Some(error) => self.search_error = Some(error),
            None => {
                self.movies = outcome.movies;
                self.selected_index = 0;
                self.search_error = None;
                self.has_searched = true;
                self.last_search = outcome.cached_at;
            }
        }
        if self.state == AppState::Loading {
            self.state = AppState::MovieList;
        }
    }
}
