// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST client for the address capture service
//!
//! Talks to the Loqate `Capture/Interactive` Find and Retrieve endpoints and
//! implements [`AddressService`] so the widget can use it without knowing the
//! wire format.

pub mod auth;
pub mod client;
pub mod error;
pub mod network_config;
pub mod wire;

pub use auth::*;
pub use client::*;
pub use error::*;

use af_client_api::{AddressService, ClientApiError, ClientApiResult, LookupParams};
use af_domain_types::{AddressRecord, Candidate};
use async_trait::async_trait;

#[async_trait]
impl AddressService for client::RestClient {
    async fn lookup(&self, params: &LookupParams) -> ClientApiResult<Vec<Candidate>> {
        self.find(params).await.map_err(ClientApiError::from)
    }

    async fn resolve(&self, candidate_id: &str) -> ClientApiResult<AddressRecord> {
        self.retrieve(candidate_id).await.map_err(ClientApiError::from)
    }
}
