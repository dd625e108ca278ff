// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Search candidates and the selection outcome they map to

use serde::{Deserialize, Serialize};

/// The service type label that marks a candidate as a final address.
pub const ADDRESS_TYPE_LABEL: &str = "Address";

/// Whether a candidate is a final address or needs a drill-down request first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CandidateKind {
    /// A partial location (street, postcode, building) holding more candidates
    Container,
    /// A complete address that can be retrieved
    Address,
}

impl CandidateKind {
    /// Classify a raw service type label (`Address`, `Street`, `Postcode`, ...).
    pub fn from_type_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case(ADDRESS_TYPE_LABEL) {
            CandidateKind::Address
        } else {
            CandidateKind::Container
        }
    }
}

/// One ranked result returned by the address-search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Service id; used as container scope or retrieve id
    pub id: String,
    pub text: String,
    pub description: String,
    /// Highlight ranges as sent by the service (`"0-1,4-5"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    /// Raw service type label
    pub type_label: String,
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        description: impl Into<String>,
        type_label: impl Into<String>,
    ) -> Self {
        let type_label = type_label.into();
        let kind = CandidateKind::from_type_label(&type_label);
        Self {
            id: id.into(),
            text: text.into(),
            description: description.into(),
            highlight: None,
            type_label,
            kind,
        }
    }

    pub fn with_highlight(mut self, highlight: impl Into<String>) -> Self {
        self.highlight = Some(highlight.into());
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind == CandidateKind::Container
    }

    /// Text shown in a result row: `"<text> <description>"`.
    pub fn display_label(&self) -> String {
        if self.description.is_empty() {
            self.text.clone()
        } else {
            format!("{} {}", self.text, self.description)
        }
    }

    /// Parse the service highlight string into character ranges over `text`.
    ///
    /// Only the first `;`-separated group applies to `text`; malformed pairs
    /// are skipped.
    pub fn highlight_ranges(&self) -> Vec<std::ops::Range<usize>> {
        let Some(highlight) = self.highlight.as_deref() else {
            return Vec::new();
        };
        let text_group = highlight.split(';').next().unwrap_or_default();
        text_group
            .split(',')
            .filter_map(|pair| {
                let (start, end) = pair.trim().split_once('-')?;
                let start = start.parse::<usize>().ok()?;
                let end = end.parse::<usize>().ok()?;
                (start < end).then_some(start..end)
            })
            .collect()
    }

    /// The outcome that activating this candidate produces.
    pub fn selection_outcome(&self) -> SelectionOutcome {
        match self.kind {
            CandidateKind::Container => SelectionOutcome::Refine(ContainerContext {
                id: self.id.clone(),
                label: self.display_label(),
            }),
            CandidateKind::Address => SelectionOutcome::Resolve {
                candidate_id: self.id.clone(),
            },
        }
    }
}

/// Scope of a refinement search: the container candidate that was drilled into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerContext {
    pub id: String,
    pub label: String,
}

/// What selecting a candidate leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Search again inside the container
    Refine(ContainerContext),
    /// Fetch the full record and hand it to the host
    Resolve { candidate_id: String },
}
