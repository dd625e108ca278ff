// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main REST client implementation

use std::time::Duration;

use af_client_api::LookupParams;
use af_domain_types::{AddressRecord, Candidate};
use reqwest::{Client as HttpClient, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::auth::ApiKey;
use crate::error::{RestClientError, RestClientResult};
use crate::network_config::NetworkConfig;
use crate::wire;

/// Base endpoint used when the host does not override `api_url`
pub const DEFAULT_API_URL: &str = "https://api.addressy.com/Capture/Interactive";

const FIND_PATH: [&str; 3] = ["Find", "v1.1", "json3.ws"];
const RETRIEVE_PATH: [&str; 3] = ["Retrieve", "v1.2", "json3.ws"];
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client for the address capture service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    api_key: ApiKey,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(base_url: Url, api_key: ApiKey, network: &NetworkConfig) -> RestClientResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(RestClientError::BaseUrl(base_url.to_string()));
        }

        let timeout = network.request_timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT);
        let user_agent = network
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("address-finder/{}", env!("CARGO_PKG_VERSION")));
        let http_client = HttpClient::builder().user_agent(user_agent).timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, api_key: ApiKey) -> RestClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Self::new(base_url, api_key, &NetworkConfig::default())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Find candidates matching `params.text`
    #[instrument(skip(self, params), fields(text = %params.text, container = ?params.container))]
    pub async fn find(&self, params: &LookupParams) -> RestClientResult<Vec<Candidate>> {
        let mut query: Vec<(&str, String)> = vec![
            ("Key", self.api_key.expose().to_string()),
            ("Text", params.text.clone()),
            ("Language", params.locale.clone()),
            ("Limit", params.limit.to_string()),
        ];
        if let Some(container) = &params.container {
            query.push(("Container", container.clone()));
        }
        if !params.countries.is_empty() {
            query.push(("Countries", params.countries.join(",")));
        }

        let body = self.get(&FIND_PATH, &query).await?;
        let candidates = wire::decode_find(&body)?;
        debug!(count = candidates.len(), "find returned candidates");
        Ok(candidates)
    }

    /// Retrieve the full record for an address id
    #[instrument(skip(self))]
    pub async fn retrieve(&self, candidate_id: &str) -> RestClientResult<AddressRecord> {
        let query = [
            ("Key", self.api_key.expose().to_string()),
            ("Id", candidate_id.to_string()),
        ];
        let body = self.get(&RETRIEVE_PATH, &query).await?;
        wire::decode_retrieve(&body, candidate_id)
    }

    // Private helper methods

    fn endpoint(&self, segments: &[&str]) -> RestClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RestClientError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> RestClientResult<String> {
        let url = self.endpoint(segments)?;
        let response = self.http_client.get(url).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> RestClientResult<String> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(RestClientError::ServerError { status, body: text })
        }
    }
}
