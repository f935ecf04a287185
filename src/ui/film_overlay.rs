//! Film overlay on top of the movie list
//!
//! Shows the best-available record for the selected movie while its
//! details load.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::help_overlay::centered_rect;
use crate::ui::movie_detail::{panel_lines, panel_title};

/// Renders the overlay if one is open
pub fn render(frame: &mut Frame, app: &App) {
    let Some(panel) = &app.overlay else {
        return;
    };
    let palette = app.theme.palette();
    let area = frame.area();

    let width = area.width.saturating_sub(8).min(72);
    let height = area.height.saturating_sub(4).min(22);
    let overlay_area = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay_area);

    let mut lines = panel_lines(panel, &palette);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(palette.muted),
    )));

    let block = Block::default()
        .title(Span::styled(panel_title(panel), palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DetailPanel;
    use crate::fake::{movie, FakeApi};
    use beatvideo::error::{ErrorKind, FetchError, Flow};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_overlay(panel: DetailPanel) -> App {
        let mut app = App::new(Arc::new(FakeApi::new()));
        app.overlay = Some(panel);
        app
    }

    #[test]
    fn test_nothing_rendered_without_overlay() {
        let app = App::new(Arc::new(FakeApi::new()));
        let content = render_to_string(&app);
        assert!(content.trim().is_empty());
    }

    #[test]
    fn test_overlay_shows_summary_while_loading() {
        let app = app_with_overlay(DetailPanel {
            movie_id: Some(1),
            movie: movie(1, "Casablanca", 8.5),
            loading: true,
            error: None,
        });

        let content = render_to_string(&app);

        assert!(content.contains("Casablanca"));
        assert!(content.contains("Loading details"));
        assert!(content.contains("8.5"));
    }

    #[test]
    fn test_overlay_shows_forbidden_banner() {
        let app = app_with_overlay(DetailPanel {
            movie_id: Some(1),
            movie: movie(1, "Casablanca", 8.5),
            loading: false,
            error: Some(FetchError::new(ErrorKind::Forbidden, Flow::Detail)),
        });

        let content = render_to_string(&app);

        assert!(content.contains("403"));
        assert!(content.contains("Casablanca"), "summary stays visible");
    }
}
