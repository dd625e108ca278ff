// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Where the candidate list is painted
//!
//! Inline lists live inside the wrapper and push following content down.
//! Overlay lists are painted in a second pass, anchored to the input and
//! measured again on every frame.

use ratatui::layout::Rect;

/// Height of the bordered input box
pub const INPUT_HEIGHT: u16 = 3;
/// Rows shown before the list scrolls
pub const MAX_VISIBLE_ROWS: u16 = 10;
const LIST_BORDER_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Inline,
    Overlay,
}

impl Surface {
    pub fn choose(inline: bool) -> Self {
        if inline {
            Surface::Inline
        } else {
            Surface::Overlay
        }
    }
}

/// Outer height of a list showing `rows` candidates, zero when there are none
pub fn list_height(rows: usize) -> u16 {
    if rows == 0 {
        return 0;
    }
    let rows = u16::try_from(rows).unwrap_or(u16::MAX).min(MAX_VISIBLE_ROWS);
    rows + LIST_BORDER_ROWS
}

/// Rectangles owned by the widget in layout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderLayout {
    pub wrapper: Rect,
    pub input: Rect,
    /// Present only for inline lists with rows to show
    pub inline_list: Option<Rect>,
}

pub fn layout_finder(area: Rect, surface: Surface, list_height: u16) -> FinderLayout {
    let input = Rect {
        height: INPUT_HEIGHT.min(area.height),
        ..area
    };

    let inline_list = match surface {
        Surface::Inline => {
            let height = list_height.min(area.height - input.height);
            (height > 0).then_some(Rect {
                y: input.bottom(),
                height,
                ..area
            })
        }
        Surface::Overlay => None,
    };

    let wrapper = Rect {
        height: input.height + inline_list.map_or(0, |list| list.height),
        ..area
    };

    FinderLayout {
        wrapper,
        input,
        inline_list,
    }
}

/// Anchor an overlay of `height` rows to `anchor`, matching its width.
///
/// Prefers the space below, flips above when only that side fits, and
/// otherwise takes the larger side and clips to the screen.
pub fn place_overlay(screen: Rect, anchor: Rect, height: u16) -> Option<Rect> {
    if height == 0 || anchor.width == 0 {
        return None;
    }
    let below = screen.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(screen.y);

    let (y, height) = if height <= below {
        (anchor.bottom(), height)
    } else if height <= above {
        (anchor.y - height, height)
    } else if below >= above {
        (anchor.bottom(), below)
    } else {
        (screen.y, above)
    };

    let popup = Rect {
        x: anchor.x,
        y,
        width: anchor.width,
        height,
    }
    .intersection(screen);
    (!popup.is_empty()).then_some(popup)
}
