// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Overridable render strategy for the input, the list and its rows
//!
//! The controller computes the props; a [`Components`] implementation only
//! paints them. Override any subset of methods and keep the defaults for the
//! rest.

use af_domain_types::Candidate;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;

pub struct InputProps<'a> {
    pub value: &'a str,
    /// Caret position in chars
    pub cursor: usize,
    pub placeholder: Option<&'a str>,
    /// Label of the container being refined into
    pub scope: Option<&'a str>,
    pub loading: bool,
    pub focused: bool,
    /// The `input` style slot
    pub style: Style,
    pub theme: &'a Theme,
}

pub struct ListProps<'a> {
    pub item_count: usize,
    pub loading: bool,
    /// The `list` style slot
    pub style: Style,
    pub theme: &'a Theme,
}

pub struct ListItemProps<'a> {
    pub candidate: &'a Candidate,
    pub index: usize,
    pub highlighted: bool,
    /// The `list_item` style slot
    pub style: Style,
    pub theme: &'a Theme,
}

pub trait Components {
    fn input(&self, frame: &mut Frame<'_>, area: Rect, props: &InputProps<'_>) {
        render_default_input(frame, area, props);
    }

    /// Paint the list chrome and return the area left for rows.
    fn list(&self, frame: &mut Frame<'_>, area: Rect, props: &ListProps<'_>) -> Rect {
        render_default_list(frame, area, props)
    }

    fn list_item(&self, frame: &mut Frame<'_>, area: Rect, props: &ListItemProps<'_>) {
        render_default_list_item(frame, area, props);
    }
}

/// Built-in look
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComponents;

impl Components for DefaultComponents {}

pub fn render_default_input(frame: &mut Frame<'_>, area: Rect, props: &InputProps<'_>) {
    let theme = props.theme;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(props.focused))
        .style(theme.text_style().patch(props.style));
    if let Some(scope) = props.scope {
        block = block.title(Span::styled(format!(" in {scope} "), theme.muted_style()));
    }
    if props.loading {
        block = block.title_bottom(Line::from(Span::styled(" searching… ", theme.muted_style())).right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.is_empty() {
        return;
    }

    let line = if props.value.is_empty() {
        Line::from(Span::styled(
            props.placeholder.unwrap_or_default().to_string(),
            theme.muted_style(),
        ))
    } else {
        let (visible, _) = visible_window(props.value, props.cursor, inner.width);
        Line::from(visible)
    };
    frame.render_widget(Paragraph::new(line), inner);

    if props.focused {
        let (_, caret) = visible_window(props.value, props.cursor, inner.width);
        frame.set_cursor_position(Position::new(inner.x + caret, inner.y));
    }
}

pub fn render_default_list(frame: &mut Frame<'_>, area: Rect, props: &ListProps<'_>) -> Rect {
    let theme = props.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(true))
        .style(theme.panel_style().patch(props.style));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub fn render_default_list_item(frame: &mut Frame<'_>, area: Rect, props: &ListItemProps<'_>) {
    let theme = props.theme;
    let candidate = props.candidate;
    let mut base = theme.text_style().patch(props.style);
    if props.highlighted {
        base = base.patch(theme.selected_style());
    }

    let marker = if props.highlighted { "▸ " } else { "  " };
    let mut spans = vec![Span::raw(marker)];
    spans.extend(highlighted_spans(candidate, theme.match_style()));

    let used = UnicodeWidthStr::width(marker) + UnicodeWidthStr::width(candidate.text.as_str());
    let room = (area.width as usize).saturating_sub(used + 1);
    if !candidate.description.is_empty() && room > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            truncate_by_width(&candidate.description, room),
            theme.muted_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

/// Split the candidate text into plain and matched spans using its
/// highlight ranges (char offsets).
pub fn highlighted_spans(candidate: &Candidate, match_style: Style) -> Vec<Span<'static>> {
    let ranges = candidate.highlight_ranges();
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_match = false;

    for (index, ch) in candidate.text.chars().enumerate() {
        let matched = ranges.iter().any(|range| range.contains(&index));
        if matched != in_match && !current.is_empty() {
            spans.push(styled(std::mem::take(&mut current), in_match, match_style));
        }
        in_match = matched;
        current.push(ch);
    }
    if !current.is_empty() {
        spans.push(styled(current, in_match, match_style));
    }
    spans
}

fn styled(text: String, matched: bool, match_style: Style) -> Span<'static> {
    if matched {
        Span::styled(text, match_style)
    } else {
        Span::raw(text)
    }
}

/// The slice of `text` that fits in `width` columns with the caret visible,
/// and the caret column within it.
pub fn visible_window(text: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = width as usize;
    if width == 0 {
        return (String::new(), 0);
    }
    let cells: Vec<(char, usize)> = text
        .chars()
        .map(|ch| (ch, UnicodeWidthChar::width(ch).unwrap_or(0)))
        .collect();
    let caret_col: usize = cells.iter().take(cursor).map(|(_, w)| w).sum();

    let mut start = 0;
    let mut skipped = 0;
    while caret_col.saturating_sub(skipped) >= width && start < cells.len() {
        skipped += cells[start].1;
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for &(ch, w) in &cells[start..] {
        if used + w > width {
            break;
        }
        visible.push(ch);
        used += w;
    }
    let caret = caret_col.saturating_sub(skipped).min(width - 1);
    (visible, caret as u16)
}

/// Cut `text` to `max_width` columns on grapheme boundaries, ending in `…`
/// when something was dropped.
pub fn truncate_by_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut remaining = max_width.saturating_sub(1);
    let mut result = String::new();
    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme);
        if width > remaining {
            break;
        }
        result.push_str(grapheme);
        remaining -= width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_scrolls_to_keep_caret_visible() {
        assert_eq!(visible_window("abc", 3, 10), ("abc".to_string(), 3));
        let (visible, caret) = visible_window("abcdefghij", 10, 4);
        assert_eq!(visible, "hij");
        assert_eq!(caret, 3);
    }

    #[test]
    fn truncation_adds_ellipsis() {
        assert_eq!(truncate_by_width("London, NW8 9AY", 20), "London, NW8 9AY");
        assert_eq!(truncate_by_width("London, NW8 9AY", 7), "London…");
    }

    #[test]
    fn spans_follow_highlight_ranges() {
        let candidate = Candidate::new("x", "Abbey Road", "", "Address").with_highlight("0-2,6-7");
        let texts: Vec<String> = highlighted_spans(&candidate, Style::default())
            .into_iter()
            .map(|span| span.content.into_owned())
            .collect();
        assert_eq!(texts, vec!["Ab", "bey ", "R", "oad"]);
    }
}
