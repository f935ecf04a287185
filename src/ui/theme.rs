//! Dark and light colour palettes
//!
//! The active theme is part of the application state and handed to every
//! renderer; nothing here is global.

use ratatui::style::{Color, Modifier, Style};

use beatvideo::error::{FetchError, Severity};

/// Which palette is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                accent: Color::Rgb(0x61, 0xda, 0xfb),
                rating: Color::Rgb(0xff, 0xd7, 0x00),
                link: Color::Rgb(0x38, 0xc9, 0xff),
                text: Color::White,
                muted: Color::DarkGray,
                key: Color::Yellow,
                warning: Color::Rgb(0xff, 0xae, 0x44),
                error: Color::Rgb(0xff, 0x44, 0x44),
            },
            Theme::Light => Palette {
                accent: Color::Rgb(0x25, 0x68, 0xef),
                rating: Color::Rgb(0xb8, 0x86, 0x0b),
                link: Color::Rgb(0x1a, 0x4f, 0xc4),
                text: Color::Black,
                muted: Color::Gray,
                key: Color::Rgb(0x8a, 0x4b, 0x00),
                warning: Color::Rgb(0xc7, 0x77, 0x00),
                error: Color::Rgb(0xcc, 0x00, 0x00),
            },
        }
    }
}

/// Colours used by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub rating: Color,
    pub link: Color,
    pub text: Color,
    pub muted: Color,
    /// Key names in hint lines
    pub key: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Banner style for an error: softer for rate limits
    pub fn error_style(&self, error: &FetchError) -> Style {
        let color = match error.severity() {
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
