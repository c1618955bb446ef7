use crate::config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Resolved styles handed to every render function.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub subtitle: Style,
    pub hint: Style,
    pub success: Style,
    pub error: Style,
    pub highlight: Style,
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let accent = parse_color("accent", &config.accent, &defaults.accent);
        let muted = parse_color("muted", &config.muted, &defaults.muted);
        let hint = parse_color("hint", &config.hint, &defaults.hint);
        let success = parse_color("success", &config.success, &defaults.success);
        let error = parse_color("error", &config.error, &defaults.error);
        let highlight = parse_color("highlight", &config.highlight, &defaults.highlight);

        Self {
            title: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(muted),
            hint: Style::default().fg(hint).add_modifier(Modifier::ITALIC),
            success: Style::default().fg(success).add_modifier(Modifier::BOLD),
            error: Style::default().fg(error),
            highlight: Style::default().fg(highlight).add_modifier(Modifier::BOLD),
            border: Style::default().fg(accent),
        }
    }
}

fn parse_color(field: &str, value: &str, fallback: &str) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        tracing::warn!(field, value, "invalid theme colour, using default");
        Color::from_str(fallback).unwrap_or(Color::Reset)
    })
}
