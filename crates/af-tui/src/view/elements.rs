// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Stable element identifiers and the per-frame registry mapping them to cells

use ratatui::layout::Rect;

pub const WRAPPER_ID: &str = "address-finder";
pub const INPUT_ID: &str = "address-finder-input";
pub const LIST_ID: &str = "address-finder-list";
pub const LIST_ITEM_PREFIX: &str = "address-finder-list-item-";
pub const ERROR_NOTIFICATION_ID: &str = "error-notification";

pub fn list_item_id(candidate_id: &str) -> String {
    format!("{LIST_ITEM_PREFIX}{candidate_id}")
}

/// Element ids rendered in one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementRegistry {
    elements: Vec<(String, Rect)>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` at `rect`, replacing an earlier entry with the same id.
    pub fn register(&mut self, id: impl Into<String>, rect: Rect) {
        let id = id.into();
        match self.elements.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = rect,
            None => self.elements.push((id, rect)),
        }
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, rect)| *rect)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(id, _)| id.as_str())
    }

    /// Candidate ids of the rendered list rows, top to bottom
    pub fn list_items(&self) -> Vec<(&str, Rect)> {
        self.elements
            .iter()
            .filter_map(|(id, rect)| id.strip_prefix(LIST_ITEM_PREFIX).map(|cid| (cid, *rect)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
