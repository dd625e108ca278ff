// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Address service abstraction
//!
//! The widget never talks HTTP directly. It depends on [`AddressService`],
//! which the REST client and the mock client both implement. The API key and
//! base URL belong to the implementation, not to the caller.

use af_domain_types::{AddressRecord, Candidate, SearchRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters of a single lookup call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupParams {
    pub text: String,
    pub locale: String,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
}

impl From<&SearchRequest> for LookupParams {
    fn from(request: &SearchRequest) -> Self {
        Self {
            text: request.query.clone(),
            locale: request.locale.clone(),
            limit: request.limit,
            container: request.container_id().map(str::to_owned),
            countries: request.countries.clone(),
        }
    }
}

/// Errors reported by an address service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service error {code}: {description}")]
    Service {
        code: String,
        description: String,
        cause: Option<String>,
        resolution: Option<String>,
    },
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("no address record returned for {0}")]
    NotFound(String),
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// The remote address-search collaborator
#[async_trait]
pub trait AddressService: Send + Sync {
    /// Find candidates for `params.text`, optionally scoped to a container.
    async fn lookup(&self, params: &LookupParams) -> ClientApiResult<Vec<Candidate>>;

    /// Retrieve the full record for an address candidate.
    async fn resolve(&self, candidate_id: &str) -> ClientApiResult<AddressRecord>;
}
