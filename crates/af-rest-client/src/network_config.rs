// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Network configuration types

use serde::{Deserialize, Serialize};

/// Network configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Seconds before a single lookup or retrieve call is abandoned
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
    /// Override for the HTTP user agent
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}
