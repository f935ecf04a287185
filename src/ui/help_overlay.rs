//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::{Palette, Theme};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, theme: Theme) {
    let palette = theme.palette();
    let area = frame.area();

    let overlay_area = centered_rect(50, 22, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let section = |name: &'static str| {
        Line::from(Span::styled(
            name,
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", palette.title())),
        Line::from(""),
        section("Search"),
        help_line("←/h, →/l", "Previous/next genre", &palette),
        help_line("+, -", "Raise/lower minimum rating", &palette),
        help_line("s, /", "Search", &palette),
        Line::from(""),
        section("Navigation"),
        help_line("↑/k, ↓/j", "Move selection up/down", &palette),
        help_line("Enter", "Open film overlay", &palette),
        help_line("d", "Open detail page", &palette),
        help_line("Esc", "Go back / Close", &palette),
        Line::from(""),
        section("Other"),
        help_line("t", &format!("Toggle theme ({})", theme.name()), &palette),
        help_line("?", "Toggle this help", &palette),
        help_line("q", "Quit application", &palette),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(palette.muted),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(palette.border());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(palette.key)),
        Span::raw(description.to_string()),
    ])
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
