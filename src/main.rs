//! beatvideo - Browse top-rated movies from the terminal
//!
//! A terminal UI application that searches a RapidAPI movie database by
//! genre and minimum rating and shows details for each result.

mod app;
mod fetch;
mod ui;

#[cfg(test)]
#[allow(dead_code)]
#[path = "controllers/fake.rs"]
mod fake;

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use beatvideo::cli::{Cli, StartupConfig};
use beatvideo::data::{MovieApi, MovieClient};
use beatvideo::logging;

use app::{App, AppState};
use fetch::FetchHandle;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => {
            render_loading(frame, app);
        }
        AppState::MovieList => {
            ui::render_movie_list(frame, app);
            ui::render_film_overlay(frame, app);
        }
        AppState::MovieDetail(movie_id) => {
            ui::render_movie_detail(frame, app, *movie_id);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame, app.theme);
    }
}

/// Renders a loading message while the first search runs
fn render_loading(frame: &mut ratatui::Frame, app: &App) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::Style,
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading movies...")
        .style(Style::default().fg(app.theme.palette().accent))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    match logging::init(config.log_file.as_deref()) {
        Ok(path) => info!(path = %path.display(), "beatvideo starting"),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    if config.client.api_key.is_none() {
        error!("no RapidAPI key configured; set RAPIDAPI_KEY or pass --api-key");
    }

    let client = MovieClient::new(&config.client)?;
    info!(base_url = client.base_url(), "movie client ready");
    let api: Arc<dyn MovieApi> = Arc::new(client);
    let mut app = App::with_startup_config(api, config);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut fetches = FetchHandle::new();

    // Main event loop
    loop {
        for job in app.take_jobs() {
            fetches.spawn(job);
        }
        while let Some(message) = fetches.try_recv() {
            app.apply(message);
        }

        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    info!("beatvideo exiting");

    Ok(())
}
