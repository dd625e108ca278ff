// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Mock address service implementing [`AddressService`] for testing
//!
//! Serves canned candidates without touching the network. Delays can be set
//! globally or per query text so tests can make an older request finish after
//! a newer one, and every call is recorded for later inspection.

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use af_client_api::{AddressService, ClientApiError, ClientApiResult, LookupParams};
use af_domain_types::{AddressRecord, Candidate};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// A call received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Lookup(LookupParams),
    Resolve(String),
}

/// Mock address service
#[derive(Debug, Clone)]
pub struct MockAddressService {
    top_level: Vec<Candidate>,
    containers: HashMap<String, Vec<Candidate>>,
    records: HashMap<String, AddressRecord>,
    /// Exact query text answered with a fixed list, ignoring filtering
    canned: HashMap<String, Vec<Candidate>>,
    /// Configurable delay for every call (in milliseconds)
    delay_ms: u64,
    query_delays: HashMap<String, u64>,
    simulate_failures: bool,
    failing_queries: HashSet<String>,
    calls: Arc<RwLock<Vec<MockCall>>>,
}

impl Default for MockAddressService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAddressService {
    /// Create an empty mock that answers every lookup with no candidates
    pub fn new() -> Self {
        Self {
            top_level: Vec::new(),
            containers: HashMap::new(),
            records: HashMap::new(),
            canned: HashMap::new(),
            delay_ms: 0,
            query_delays: HashMap::new(),
            simulate_failures: false,
            failing_queries: HashSet::new(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a mock loaded with the Abbey Road fixtures
    pub fn with_mock_data() -> Self {
        let mut service = Self::new();
        let top_level = fixtures::abbey_road_candidates();
        let children = fixtures::abbey_road_street_children();
        for candidate in top_level.iter().chain(children.iter()) {
            if !candidate.is_container() {
                service
                    .records
                    .insert(candidate.id.clone(), fixtures::record_for(&candidate.id, &candidate.text));
            }
        }
        service
            .containers
            .insert(fixtures::ABBEY_ROAD_STREET_ID.to_string(), children);
        service.top_level = top_level;
        service
    }

    /// Create a mock that simulates failures on every call
    pub fn with_failures(simulate_failures: bool) -> Self {
        Self {
            simulate_failures,
            ..Self::with_mock_data()
        }
    }

    /// Apply a delay to every call
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Apply a delay to lookups whose text equals `text`, overriding the global one
    pub fn delay_query(mut self, text: impl Into<String>, delay_ms: u64) -> Self {
        self.query_delays.insert(text.into(), delay_ms);
        self
    }

    /// Make lookups for `text` fail with a service error
    pub fn fail_query(mut self, text: impl Into<String>) -> Self {
        self.failing_queries.insert(text.into());
        self
    }

    /// Answer lookups for `text` with `candidates` verbatim
    pub fn respond_to(mut self, text: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        self.canned.insert(text.into(), candidates);
        self
    }

    /// Register children for a container id
    pub fn with_container(mut self, container_id: impl Into<String>, children: Vec<Candidate>) -> Self {
        self.containers.insert(container_id.into(), children);
        self
    }

    /// Register a retrievable record
    pub fn with_record(mut self, record: AddressRecord) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    /// All calls received so far, in arrival order
    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.read().await.clone()
    }

    /// Lookup calls received so far
    pub async fn lookups(&self) -> Vec<LookupParams> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                MockCall::Lookup(params) => Some(params.clone()),
                MockCall::Resolve(_) => None,
            })
            .collect()
    }

    /// Ids passed to resolve so far
    pub async fn resolves(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                MockCall::Resolve(id) => Some(id.clone()),
                MockCall::Lookup(_) => None,
            })
            .collect()
    }

    async fn sleep_for(&self, delay_ms: u64) {
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    fn simulated_failure(&self) -> ClientApiError {
        ClientApiError::Service {
            code: "2".to_string(),
            description: "Unknown key".to_string(),
            cause: Some("The key you are using to access the service was not found.".to_string()),
            resolution: Some("Please check that the key is correct.".to_string()),
        }
    }

    fn candidates_for(&self, params: &LookupParams) -> Vec<Candidate> {
        if let Some(canned) = self.canned.get(&params.text) {
            return canned.clone();
        }
        let pool = match &params.container {
            Some(container) => self.containers.get(container).cloned().unwrap_or_default(),
            None => self.top_level.clone(),
        };
        let terms: Vec<String> = params
            .text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        pool.into_iter()
            .filter(|candidate| {
                let label = candidate.display_label().to_lowercase();
                // Inside a container the service lists every child.
                params.container.is_some() || terms.iter().all(|term| label.contains(term))
            })
            .take(params.limit as usize)
            .collect()
    }
}

#[async_trait]
impl AddressService for MockAddressService {
    async fn lookup(&self, params: &LookupParams) -> ClientApiResult<Vec<Candidate>> {
        self.calls.write().await.push(MockCall::Lookup(params.clone()));

        let delay = self.query_delays.get(&params.text).copied().unwrap_or(self.delay_ms);
        self.sleep_for(delay).await;

        if self.simulate_failures || self.failing_queries.contains(&params.text) {
            return Err(self.simulated_failure());
        }

        let candidates = self.candidates_for(params);
        debug!(text = %params.text, count = candidates.len(), "mock lookup");
        Ok(candidates)
    }

    async fn resolve(&self, candidate_id: &str) -> ClientApiResult<AddressRecord> {
        self.calls
            .write()
            .await
            .push(MockCall::Resolve(candidate_id.to_string()));
        self.sleep_for(self.delay_ms).await;

        if self.simulate_failures {
            return Err(self.simulated_failure());
        }

        self.records
            .get(candidate_id)
            .cloned()
            .ok_or_else(|| ClientApiError::NotFound(candidate_id.to_string()))
    }
}
