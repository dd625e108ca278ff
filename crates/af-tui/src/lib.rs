// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal address finder
//!
//! An incremental address-lookup widget: typed text is debounced into
//! lookups against an [`af_client_api::AddressService`], responses pass a
//! sequence gate so only the latest request is shown, and activating a
//! candidate either drills into a container or retrieves the full record for
//! the host.

pub mod error;
pub mod lookup_config;
pub mod lookup_loop;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod view_model;

pub use error::LookupError;
pub use lookup_config::{ClickAwayPolicy, LookupConfig, StyleSlots};
pub use lookup_loop::{run_finder, FinderDependencies};
pub use theme::Theme;
pub use view::{Components, DefaultComponents, ErrorBoundary, FinderView, RenderedLayout};
pub use view_model::{LookupViewModel, MouseAction, Msg, ResultStatus};
