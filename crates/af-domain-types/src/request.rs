// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Search requests as issued by the search session

use serde::{Deserialize, Serialize};

use crate::candidate::ContainerContext;

/// Monotonically increasing request number handed out by a sequence gate
pub type SequenceNumber = u64;

/// One issued lookup. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub sequence: SequenceNumber,
    pub query: String,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerContext>,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
}

impl SearchRequest {
    pub fn container_id(&self) -> Option<&str> {
        self.container.as_ref().map(|c| c.id.as_str())
    }
}
