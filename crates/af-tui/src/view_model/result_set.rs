// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Ordered candidates, the highlighted row and the lookup status

use af_domain_types::Candidate;

/// Lifecycle of the current result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResultStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Empty,
    Error,
}

/// Pure state holder for the candidate list
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    items: Vec<Candidate>,
    highlighted: Option<usize>,
    status: ResultStatus,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh list in service order. Always drops the highlight.
    pub fn replace(&mut self, items: Vec<Candidate>) {
        self.status = if items.is_empty() {
            ResultStatus::Empty
        } else {
            ResultStatus::Ready
        };
        self.items = items;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.highlighted = None;
        self.status = ResultStatus::Idle;
    }

    /// Mark a request as outstanding; the previous items stay visible.
    pub fn begin_loading(&mut self) {
        self.status = ResultStatus::Loading;
    }

    /// A failed lookup shows no list.
    pub fn fail(&mut self) {
        self.items.clear();
        self.highlighted = None;
        self.status = ResultStatus::Error;
    }

    pub fn highlight_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    /// Moves up one row, stopping at the first. Nothing happens without a highlight.
    pub fn highlight_previous(&mut self) {
        if let Some(i) = self.highlighted {
            self.highlighted = Some(i.saturating_sub(1));
        }
    }

    /// Highlight row `index`; out-of-range indices are ignored.
    pub fn highlight_index(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.highlighted = Some(index);
            true
        } else {
            false
        }
    }

    pub fn active_candidate(&self) -> Option<&Candidate> {
        self.highlighted.and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn status(&self) -> ResultStatus {
        self.status
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
