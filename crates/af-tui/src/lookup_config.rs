// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Finder configuration exposed to the host

use ratatui::style::Style;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "en-GB";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 1;

/// Style overrides patched over the theme for each part of the widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StyleSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<Style>,
}

/// What a pointer press outside the widget does to an open list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClickAwayPolicy {
    /// Leave the list open
    #[default]
    Keep,
    /// Close the list as if Escape was pressed
    Dismiss,
}

/// Finder configuration
///
/// `api_key` and `api_url` are carried for the host, which uses them to build
/// the address service; the controller itself never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LookupConfig {
    /// Locale token passed through to the service
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Maximum candidates per lookup
    pub limit: u32,
    /// Render the list inside the widget instead of as an overlay
    pub inline: bool,
    pub debounce_ms: u64,
    /// Queries shorter than this (in characters) never reach the service
    pub min_query_length: usize,
    /// ISO country codes restricting the search
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub classes: StyleSlots,
    pub click_away: ClickAwayPolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            api_key: None,
            api_url: None,
            limit: DEFAULT_LIMIT,
            inline: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            countries: Vec::new(),
            placeholder: None,
            classes: StyleSlots::default(),
            click_away: ClickAwayPolicy::default(),
        }
    }
}

impl LookupConfig {
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}
