// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST client error types

use af_client_api::ClientApiError;
use reqwest::StatusCode;

/// Errors produced by [`crate::RestClient`]
#[derive(Debug, thiserror::Error)]
pub enum RestClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base URL cannot carry path segments: {0}")]
    BaseUrl(String),

    #[error("server returned {status}: {body}")]
    ServerError { status: StatusCode, body: String },

    #[error("service error {code}: {description}")]
    Service {
        code: String,
        description: String,
        cause: Option<String>,
        resolution: Option<String>,
    },

    #[error("no address record returned for {0}")]
    NotFound(String),
}

pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(err: RestClientError) -> Self {
        match err {
            RestClientError::Service {
                code,
                description,
                cause,
                resolution,
            } => ClientApiError::Service {
                code,
                description,
                cause,
                resolution,
            },
            RestClientError::NotFound(id) => ClientApiError::NotFound(id),
            RestClientError::Json(e) => ClientApiError::UnexpectedResponse(e.to_string()),
            other => ClientApiError::Transport(other.to_string()),
        }
    }
}
