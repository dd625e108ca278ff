// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `json3.ws` response envelopes
//!
//! Every endpoint answers `{"Items": [...]}`. A failed call still answers 200
//! with a single item carrying `Error`, `Description`, `Cause` and
//! `Resolution`, so items are first decoded as raw JSON and checked for that
//! shape before being decoded into their real type.

use af_domain_types::{AddressRecord, Candidate};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RestClientError, RestClientResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceFault {
    error: Value,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
}

/// One row of a Find response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FindItem {
    pub id: String,
    #[serde(rename = "Type")]
    pub type_label: String,
    pub text: String,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<FindItem> for Candidate {
    fn from(item: FindItem) -> Self {
        let candidate = Candidate::new(
            item.id,
            item.text,
            item.description.unwrap_or_default(),
            item.type_label,
        );
        match item.highlight.filter(|h| !h.is_empty()) {
            Some(highlight) => candidate.with_highlight(highlight),
            None => candidate,
        }
    }
}

fn decode_items(body: &str) -> RestClientResult<Vec<Value>> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if let Some(first) = envelope.items.first() {
        if first.get("Error").is_some() {
            let fault: ServiceFault = serde_json::from_value(first.clone())?;
            let code = match fault.error {
                Value::String(code) => code,
                other => other.to_string(),
            };
            return Err(RestClientError::Service {
                code,
                description: fault.description.unwrap_or_default(),
                cause: fault.cause,
                resolution: fault.resolution,
            });
        }
    }
    Ok(envelope.items)
}

/// Decode a Find body into candidates, keeping service order.
pub fn decode_find(body: &str) -> RestClientResult<Vec<Candidate>> {
    decode_items(body)?
        .into_iter()
        .map(|item| {
            serde_json::from_value::<FindItem>(item)
                .map(Candidate::from)
                .map_err(RestClientError::from)
        })
        .collect()
}

/// Decode a Retrieve body. The service may return one item per language; the
/// first one is the record.
pub fn decode_retrieve(body: &str, candidate_id: &str) -> RestClientResult<AddressRecord> {
    let first = decode_items(body)?
        .into_iter()
        .next()
        .ok_or_else(|| RestClientError::NotFound(candidate_id.to_string()))?;
    Ok(serde_json::from_value(first)?)
}
