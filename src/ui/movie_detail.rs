//! Movie detail page rendering
//!
//! Full-screen view of one movie, opened by id. The film overlay reuses
//! `panel_lines` for its body.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use beatvideo::data::Movie;

use crate::app::{App, DetailPanel};
use crate::ui::theme::Palette;

fn field_line(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(palette.muted)),
        Span::styled(value, Style::default().fg(palette.text)),
    ])
}

fn movie_fields(movie: &Movie, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(year) = movie.year {
        lines.push(field_line("Year", year.to_string(), palette));
    }
    if let Some(rating) = movie.rating {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", "Rating"), Style::default().fg(palette.muted)),
            Span::styled(
                format!("★ {rating:.1}"),
                Style::default()
                    .fg(palette.rating)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    if let Some(genres) = movie.genres_label() {
        lines.push(field_line("Genres", genres, palette));
    }
    if let Some(runtime) = movie.runtime {
        lines.push(field_line("Runtime", format!("{runtime} min"), palette));
    }
    if let Some(language) = &movie.language {
        lines.push(field_line("Language", language.clone(), palette));
    }
    if let Some(mpa) = movie.mpa_rating.as_ref().filter(|m| !m.is_empty()) {
        lines.push(field_line("Rated", mpa.clone(), palette));
    }
    if let Some(downloads) = movie.download_count {
        lines.push(field_line("Downloads", downloads.to_string(), palette));
    }
    if let Some(likes) = movie.like_count {
        lines.push(field_line("Likes", likes.to_string(), palette));
    }
    if let Some(summary) = movie.summary.as_ref().filter(|s| !s.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            summary.clone(),
            Style::default().fg(palette.text),
        )));
    }

    lines
}

/// Body shared by the overlay and the detail page
///
/// The status line comes first so a failure is visible above whatever
/// summary fields are still shown.
pub fn panel_lines(panel: &DetailPanel, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if panel.loading {
        lines.push(Line::from(Span::styled(
            "Loading details...",
            Style::default().fg(palette.accent),
        )));
        lines.push(Line::from(""));
    } else if let Some(error) = &panel.error {
        lines.push(Line::from(Span::styled(
            error.message(),
            palette.error_style(error),
        )));
        lines.push(Line::from(""));
    }

    lines.extend(movie_fields(&panel.movie, palette));
    lines
}

/// Title for a panel, falling back to the id while nothing else is known
pub fn panel_title(panel: &DetailPanel) -> String {
    if !panel.movie.title.is_empty() {
        format!(" {} ", panel.movie.title)
    } else if let Some(id) = panel.movie_id {
        format!(" Movie #{id} ")
    } else {
        " Movie ".to_string()
    }
}

/// Renders the detail page for `movie_id`
pub fn render(frame: &mut Frame, app: &App, movie_id: u64) {
    let palette = app.theme.palette();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let (title, lines) = match &app.detail_page {
        Some(panel) => (panel_title(panel), panel_lines(panel, &palette)),
        None => (format!(" Movie #{movie_id} "), Vec::new()),
    };

    let block = Block::default()
        .title(Span::styled(title, palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[0]);

    render_help(frame, &palette, chunks[1]);
}

fn render_help(frame: &mut Frame, palette: &Palette, area: Rect) {
    let key = Style::default().fg(palette.key);
    let line = Line::from(vec![
        Span::styled("Esc", key),
        Span::raw(" Back to list  "),
        Span::styled("t", key),
        Span::raw(" Theme  "),
        Span::styled("q", key),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(palette.muted)),
        area,
    );
}
