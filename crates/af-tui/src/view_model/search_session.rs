// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request issuing and the sequence gate that drops stale responses

use af_client_api::{ClientApiError, ClientApiResult};
use af_domain_types::{Candidate, ContainerContext, SearchRequest, SequenceNumber};
use tracing::debug;

use crate::lookup_config::LookupConfig;

/// Hands out increasing sequence numbers and admits only the latest one
///
/// A response is applied when its number is the one currently active and is
/// newer than anything applied before. Issuing a new number supersedes the
/// previous one; `invalidate` supersedes it without issuing.
#[derive(Debug, Clone, Default)]
pub struct SequenceGate {
    issued: SequenceNumber,
    active: Option<SequenceNumber>,
    last_applied: SequenceNumber,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> SequenceNumber {
        self.issued += 1;
        self.active = Some(self.issued);
        self.issued
    }

    /// Consume `sequence` if it may be applied. At most one `true` per number.
    pub fn admit(&mut self, sequence: SequenceNumber) -> bool {
        if self.active == Some(sequence) && sequence > self.last_applied {
            self.last_applied = sequence;
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn invalidate(&mut self) {
        self.active = None;
    }

    /// A request was issued and has not settled or been invalidated
    pub fn is_outstanding(&self) -> bool {
        self.active.is_some()
    }

    pub fn last_issued(&self) -> SequenceNumber {
        self.issued
    }
}

/// How a settled lookup affects the result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupSettlement {
    Apply(Vec<Candidate>),
    Fail(ClientApiError),
    Stale,
}

/// Builds search requests and judges their responses
#[derive(Debug, Clone)]
pub struct SearchSession {
    gate: SequenceGate,
    locale: String,
    limit: u32,
    countries: Vec<String>,
    min_query_length: usize,
}

impl SearchSession {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            gate: SequenceGate::new(),
            locale: config.locale.clone(),
            limit: config.limit,
            countries: config.countries.clone(),
            min_query_length: config.min_query_length.max(1),
        }
    }

    /// Whether `query` is long enough to be sent
    pub fn accepts(&self, query: &str) -> bool {
        let trimmed = query.trim();
        !trimmed.is_empty() && trimmed.chars().count() >= self.min_query_length
    }

    /// Issue a request for `query` within `container`, or `None` when the
    /// query is too short. A short query still supersedes the active request.
    pub fn search(&mut self, query: &str, container: Option<&ContainerContext>) -> Option<SearchRequest> {
        if !self.accepts(query) {
            self.gate.invalidate();
            return None;
        }
        let sequence = self.gate.issue();
        debug!(sequence, query, container = ?container.map(|c| c.id.as_str()), "issuing lookup");
        Some(SearchRequest {
            sequence,
            query: query.to_string(),
            locale: self.locale.clone(),
            container: container.cloned(),
            limit: self.limit,
            countries: self.countries.clone(),
        })
    }

    /// Issue a request scoped to `container` regardless of query length.
    /// The service lists a container's children even for an empty `Text`.
    pub fn refine(&mut self, query: &str, container: &ContainerContext) -> SearchRequest {
        let sequence = self.gate.issue();
        debug!(sequence, query, container = container.id.as_str(), "issuing refinement");
        SearchRequest {
            sequence,
            query: query.to_string(),
            locale: self.locale.clone(),
            container: Some(container.clone()),
            limit: self.limit,
            countries: self.countries.clone(),
        }
    }

    pub fn settle(
        &mut self,
        sequence: SequenceNumber,
        result: ClientApiResult<Vec<Candidate>>,
    ) -> LookupSettlement {
        if !self.gate.admit(sequence) {
            debug!(sequence, latest = self.gate.last_issued(), "discarding stale lookup response");
            return LookupSettlement::Stale;
        }
        match result {
            Ok(candidates) => LookupSettlement::Apply(candidates),
            Err(err) => LookupSettlement::Fail(err),
        }
    }

    pub fn invalidate(&mut self) {
        self.gate.invalidate();
    }

    pub fn is_loading(&self) -> bool {
        self.gate.is_outstanding()
    }
}
