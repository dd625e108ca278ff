// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Renders the finder from its view model
//!
//! Rendering is split in two passes so a host can paint its own content in
//! between: [`render_finder`] paints the wrapper, the input and an inline
//! list; [`render_overlay`] paints an overlay list on top of everything drawn
//! so far.

use ratatui::{layout::Rect, style::Style, widgets::Block, widgets::Clear, Frame};

use super::components::{Components, InputProps, ListItemProps, ListProps};
use super::elements::{list_item_id, ElementRegistry, INPUT_ID, LIST_ID, WRAPPER_ID};
use super::hit_test::HitTestRegistry;
use super::surface::{self, Surface};
use crate::theme::Theme;
use crate::view_model::{LookupViewModel, MouseAction, ResultStatus};

/// What one frame produced
#[derive(Debug, Clone)]
pub struct RenderedLayout {
    pub elements: ElementRegistry,
    pub surface: Surface,
    pub wrapper: Rect,
    pub input: Rect,
    /// Overlay height still to be painted by [`render_overlay`]
    pending_overlay: Option<u16>,
}

impl RenderedLayout {
    pub fn list_rect(&self) -> Option<Rect> {
        self.elements.get(LIST_ID)
    }
}

/// Everything the view needs besides the model
pub struct FinderView<'a> {
    pub theme: &'a Theme,
    pub components: &'a dyn Components,
}

impl FinderView<'_> {
    pub fn render_finder(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        vm: &LookupViewModel,
        hit_registry: &mut HitTestRegistry<MouseAction>,
    ) -> RenderedLayout {
        let config = vm.config();
        let surface = Surface::choose(config.inline);
        let rows = if vm.is_list_open() { vm.results().len() } else { 0 };
        let list_height = surface::list_height(rows);
        let layout = surface::layout_finder(area, surface, list_height);

        let mut elements = ElementRegistry::new();
        if let Some(style) = config.classes.wrapper {
            frame.render_widget(Block::default().style(style), layout.wrapper);
        }
        elements.register(WRAPPER_ID, layout.wrapper);
        hit_registry.register(layout.wrapper, MouseAction::FocusInput);

        let props = InputProps {
            value: vm.query(),
            cursor: vm.cursor(),
            placeholder: config.placeholder.as_deref(),
            scope: vm.container().map(|c| c.label.as_str()),
            loading: vm.status() == ResultStatus::Loading || vm.is_resolving(),
            focused: true,
            style: config.classes.input.unwrap_or_default(),
            theme: self.theme,
        };
        self.components.input(frame, layout.input, &props);
        elements.register(INPUT_ID, layout.input);

        if let Some(list_rect) = layout.inline_list {
            self.render_list(frame, list_rect, vm, hit_registry, &mut elements);
        }

        RenderedLayout {
            elements,
            surface,
            wrapper: layout.wrapper,
            input: layout.input,
            pending_overlay: (surface == Surface::Overlay && list_height > 0).then_some(list_height),
        }
    }

    /// Paint the overlay list, anchored to the input as laid out this frame.
    pub fn render_overlay(
        &self,
        frame: &mut Frame<'_>,
        layout: &mut RenderedLayout,
        vm: &LookupViewModel,
        hit_registry: &mut HitTestRegistry<MouseAction>,
    ) {
        let Some(height) = layout.pending_overlay.take() else {
            return;
        };
        let Some(popup) = surface::place_overlay(frame.area(), layout.input, height) else {
            return;
        };
        frame.render_widget(Clear, popup);
        self.render_list(frame, popup, vm, hit_registry, &mut layout.elements);
    }

    /// Both passes with nothing in between
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        vm: &LookupViewModel,
        hit_registry: &mut HitTestRegistry<MouseAction>,
    ) -> RenderedLayout {
        let mut layout = self.render_finder(frame, area, vm, hit_registry);
        self.render_overlay(frame, &mut layout, vm, hit_registry);
        layout
    }

    fn render_list(
        &self,
        frame: &mut Frame<'_>,
        rect: Rect,
        vm: &LookupViewModel,
        hit_registry: &mut HitTestRegistry<MouseAction>,
        elements: &mut ElementRegistry,
    ) {
        let results = vm.results();
        let classes = &vm.config().classes;
        let list_props = ListProps {
            item_count: results.len(),
            loading: vm.status() == ResultStatus::Loading,
            style: classes.list.unwrap_or_default(),
            theme: self.theme,
        };
        let inner = self.components.list(frame, rect, &list_props);
        elements.register(LIST_ID, rect);
        hit_registry.register(rect, MouseAction::FocusInput);

        let capacity = inner.height as usize;
        if capacity == 0 {
            return;
        }
        let start = scroll_start(results.len(), capacity, results.highlighted());
        let item_style = classes.list_item.unwrap_or(Style::default());

        for (offset, candidate) in results.items().iter().skip(start).take(capacity).enumerate() {
            let index = start + offset;
            let row = Rect {
                y: inner.y + offset as u16,
                height: 1,
                ..inner
            };
            let props = ListItemProps {
                candidate,
                index,
                highlighted: results.highlighted() == Some(index),
                style: item_style,
                theme: self.theme,
            };
            self.components.list_item(frame, row, &props);
            elements.register(list_item_id(&candidate.id), row);
            hit_registry.register(row, MouseAction::SelectCandidate(index));
        }
    }
}

/// First visible row so the highlight stays in view, roughly centred.
fn scroll_start(total: usize, capacity: usize, highlighted: Option<usize>) -> usize {
    if total <= capacity {
        return 0;
    }
    let max_start = total - capacity;
    highlighted
        .map(|selected| selected.saturating_sub(capacity / 2).min(max_start))
        .unwrap_or(0)
}
