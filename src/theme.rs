//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant`
//! selects the Dark or Light palette and `StyleMap` resolves role names to
//! concrete styles at render time.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role with its `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Slide panel --
    pub slide_title: Style,
    pub slide_description: Style,
    pub slide_image: Style,
    pub slide_loading: Style,
    pub meta_label: Style,
    pub meta_value: Style,

    // -- Summary panel --
    pub summary_body: Style,
    pub summary_loading: Style,
    pub summary_error: Style,
    pub article_link: Style,

    // -- Chrome --
    pub panel_border: Style,
    pub panel_title: Style,
    pub status_bar: Style,
    pub status_position: Style,
    pub help_key: Style,
    pub help_text: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            slide_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            slide_description: Style::default(),
            slide_image: Style::default().fg(Color::Blue),
            slide_loading: Style::default().fg(Color::Yellow),
            meta_label: Style::default().fg(Color::DarkGray),
            meta_value: Style::default().add_modifier(Modifier::BOLD),

            summary_body: Style::default(),
            summary_loading: Style::default().fg(Color::Yellow),
            summary_error: Style::default().fg(Color::Red),
            article_link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),

            panel_border: Style::default().fg(Color::DarkGray),
            panel_title: Style::default().fg(Color::Cyan),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_position: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Yellow),
            help_text: Style::default(),
        }
    }

    fn light() -> Self {
        Self {
            slide_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            slide_description: Style::default().fg(Color::Black),
            slide_image: Style::default().fg(Color::Blue),
            slide_loading: Style::default().fg(Color::Magenta),
            meta_label: Style::default().fg(Color::DarkGray),
            meta_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            summary_body: Style::default().fg(Color::Black),
            summary_loading: Style::default().fg(Color::Magenta),
            summary_error: Style::default().fg(Color::Red),
            article_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            panel_border: Style::default().fg(Color::Gray),
            panel_title: Style::default().fg(Color::Blue),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_position: Style::default()
                .bg(Color::White)
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Magenta),
            help_text: Style::default().fg(Color::Black),
        }
    }

    /// (role name, style) for every field, in declaration order.
    fn roles(&self) -> [(&'static str, Style); 16] {
        [
            ("slide_title", self.slide_title),
            ("slide_description", self.slide_description),
            ("slide_image", self.slide_image),
            ("slide_loading", self.slide_loading),
            ("meta_label", self.meta_label),
            ("meta_value", self.meta_value),
            ("summary_body", self.summary_body),
            ("summary_loading", self.summary_loading),
            ("summary_error", self.summary_error),
            ("article_link", self.article_link),
            ("panel_border", self.panel_border),
            ("panel_title", self.panel_title),
            ("status_bar", self.status_bar),
            ("status_position", self.status_position),
            ("help_key", self.help_key),
            ("help_text", self.help_text),
        ]
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        Self {
            map: p.roles().into_iter().collect(),
        }
    }

    /// Resolve a role name to its `Style`. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

impl From<ThemeVariant> for StyleMap {
    fn from(variant: ThemeVariant) -> Self {
        Self::from_palette(&variant.palette())
    }
}

// ============================================================================
// Tests
// ============================================================================
