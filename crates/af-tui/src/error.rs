// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Errors surfaced by the finder to its error boundary

use af_client_api::ClientApiError;

/// A failure the host should show. Stale failures never become a `LookupError`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("address lookup for {query:?} failed: {source}")]
    Lookup {
        query: String,
        #[source]
        source: ClientApiError,
    },

    #[error("could not retrieve address {candidate_id}: {source}")]
    Resolve {
        candidate_id: String,
        #[source]
        source: ClientApiError,
    },

    #[error("no Tokio runtime available to run address requests")]
    NoRuntime,
}

impl LookupError {
    /// Short text for the notification line
    pub fn user_message(&self) -> String {
        let source = match self {
            LookupError::Lookup { source, .. } | LookupError::Resolve { source, .. } => source,
            LookupError::NoRuntime => return self.to_string(),
        };
        match source {
            ClientApiError::Service { description, .. } if !description.is_empty() => {
                format!("Address service error: {description}")
            }
            ClientApiError::NotFound(_) => "That address is no longer available".to_string(),
            _ => "Address search is unavailable right now".to_string(),
        }
    }
}
