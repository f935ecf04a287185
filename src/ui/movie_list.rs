//! Movie list screen rendering
//!
//! Renders the filter bar, the ranked result list, the search status line
//! and the key hints with data freshness.

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use beatvideo::data::Movie;
use beatvideo::error::{ErrorKind, FetchError, Flow};

use crate::app::App;
use crate::ui::theme::Palette;

/// Renders the list view
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter bar
            Constraint::Length(1), // Status line
            Constraint::Min(3),    // Movie list
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_filter_bar(frame, app, &palette, chunks[0]);
    render_status(frame, app, &palette, chunks[1]);
    render_list(frame, app, &palette, chunks[2]);
    render_help(frame, app, &palette, chunks[3]);
}

fn render_filter_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let genre = app.current_genre().unwrap_or("Any");
    let line = Line::from(vec![
        Span::styled("Genre ", Style::default().fg(palette.muted)),
        Span::styled("◂ ", Style::default().fg(palette.key)),
        Span::styled(
            format!("{:<11}", genre),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▸", Style::default().fg(palette.key)),
        Span::raw("    "),
        Span::styled("Min rating ", Style::default().fg(palette.muted)),
        Span::styled(
            format!("{:.1}", app.min_rating),
            Style::default()
                .fg(palette.rating)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("s", Style::default().fg(palette.key)),
        Span::styled(" Search", Style::default().fg(palette.muted)),
    ]);

    let block = Block::default()
        .title(Span::styled(" BEATVIDEO ", palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let line = if app.search_loading {
        Line::from(Span::styled(
            " Loading movies...",
            Style::default().fg(palette.accent),
        ))
    } else if let Some(error) = &app.search_error {
        Line::from(Span::styled(
            format!(" {}", error.message()),
            palette.error_style(error),
        ))
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Formats one result row: rank, title, year, rating, genres, runtime
fn movie_row(rank: usize, movie: &Movie, selected: bool, palette: &Palette) -> Line<'static> {
    let cursor = if selected { "\u{25B8} " } else { "  " }; // ▸ or space
    let title_style = if selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    let year = movie
        .year
        .map(|y| format!("({y})"))
        .unwrap_or_else(|| "(----)".to_string());
    let rating = movie
        .rating
        .map(|r| format!("★ {r:.1}"))
        .unwrap_or_else(|| "★ --".to_string());

    let mut spans = vec![
        Span::styled(cursor, Style::default().fg(palette.accent)),
        Span::styled(format!("{rank:>2}. "), Style::default().fg(palette.muted)),
        Span::styled(format!("{:<32}", movie.title), title_style),
        Span::raw(" "),
        Span::styled(format!("{year:<7}"), Style::default().fg(palette.muted)),
        Span::styled(format!("{rating:<7}"), Style::default().fg(palette.rating)),
    ];
    if let Some(genres) = movie.genres_label() {
        spans.push(Span::styled(
            format!(" {genres}"),
            Style::default().fg(palette.link),
        ));
    }
    if let Some(runtime) = movie.runtime {
        spans.push(Span::styled(
            format!("  {runtime} min"),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

fn render_list(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let lines: Vec<Line> = if app.movies.is_empty() {
        if app.has_searched && app.search_error.is_none() {
            vec![Line::from(Span::styled(
                FetchError::new(ErrorKind::NotFound, Flow::Search).message(),
                Style::default().fg(palette.muted),
            ))]
        } else {
            Vec::new()
        }
    } else {
        app.movies
            .iter()
            .enumerate()
            .map(|(index, movie)| {
                movie_row(index + 1, movie, index == app.selected_index, palette)
            })
            .collect()
    };

    let block = Block::default()
        .title(" Top Rated ")
        .borders(Borders::ALL)
        .border_style(palette.border());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the help text at the bottom of the screen with data freshness
fn render_help(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let key = Style::default().fg(palette.key);
    let mut help_spans = vec![
        Span::styled("←/→", key),
        Span::raw(" Genre  "),
        Span::styled("+/-", key),
        Span::raw(" Rating  "),
        Span::styled("↑/↓", key),
        Span::raw(" Navigate  "),
        Span::styled("Enter", key),
        Span::raw(" Film  "),
        Span::styled("d", key),
        Span::raw(" Details  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit"),
    ];

    if let Some(last_search) = app.last_search {
        let elapsed = Utc::now() - last_search;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Data: {}m ago", mins_ago)
        } else {
            format!(" │ Data: {}h ago", elapsed.num_hours())
        };
        help_spans.push(Span::raw(freshness_text));
    }

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(palette.muted));
    frame.render_widget(paragraph, area);
}
