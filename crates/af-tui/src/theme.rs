// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Colour roles for the finder's default components

use ratatui::style::{Color, Modifier, Style};

/// Semantic colours; the default components only read these through the
/// style helpers below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Background of the result list
    pub panel: Color,
    pub foreground: Color,
    /// Placeholders, descriptions and hints
    pub subdued: Color,
    /// Matched characters and the focused outline
    pub accent: Color,
    pub outline: Color,
    pub highlight_bg: Color,
    pub danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin Mocha: mantle, text, overlay1, blue, surface1, surface0, red
        Self {
            panel: Color::Rgb(0x18, 0x18, 0x25),
            foreground: Color::Rgb(0xcd, 0xd6, 0xf4),
            subdued: Color::Rgb(0x7f, 0x84, 0x9c),
            accent: Color::Rgb(0x89, 0xb4, 0xfa),
            outline: Color::Rgb(0x45, 0x47, 0x5a),
            highlight_bg: Color::Rgb(0x31, 0x32, 0x44),
            danger: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }
}

impl Theme {
    /// Terminal default colours only, for hosts without true colour.
    pub fn plain() -> Self {
        Self {
            panel: Color::Reset,
            foreground: Color::Reset,
            subdued: Color::DarkGray,
            accent: Color::Cyan,
            outline: Color::Gray,
            highlight_bg: Color::DarkGray,
            danger: Color::Red,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::new().fg(self.foreground)
    }

    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.subdued)
    }

    pub fn match_style(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::new().bg(self.highlight_bg).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let colour = if focused { self.accent } else { self.outline };
        Style::new().fg(colour)
    }

    pub fn panel_style(&self) -> Style {
        Style::new().bg(self.panel)
    }

    pub fn error_style(&self) -> Style {
        Style::new().fg(self.danger).add_modifier(Modifier::BOLD)
    }
}
