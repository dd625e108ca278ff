// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View layer: pure rendering of the finder view model
//!
//! Views read the view model and paint; they never mutate controller state.
//! Every frame returns the element registry and fills the hit-test registry
//! the event loop uses to route pointer events.

pub mod components;
pub mod elements;
pub mod error_boundary;
pub mod lookup_view;
pub mod surface;

pub use components::{
    Components, DefaultComponents, InputProps, ListItemProps, ListProps, render_default_input,
    render_default_list, render_default_list_item,
};
pub use elements::{
    ElementRegistry, ERROR_NOTIFICATION_ID, INPUT_ID, LIST_ID, LIST_ITEM_PREFIX, WRAPPER_ID,
    list_item_id,
};
pub use error_boundary::ErrorBoundary;
pub use hit_test::{HitMatch, HitTestRegistry};
pub use lookup_view::{FinderView, RenderedLayout};
pub use surface::{Surface, place_overlay};
