// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Root configuration struct and layered loading for address-finder.
//!
//! Subsystem configurations are flattened into one document. Layers are
//! applied in order: built-in defaults, then the TOML file, then `AF_*`
//! environment variables. Command-line flags are applied on top by
//! [`crate::Cli::apply`].

use std::path::{Path, PathBuf};

use af_logging::logging_config::LoggingConfig;
use af_rest_client::network_config::NetworkConfig;
use af_tui::LookupConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ENV_PREFIX: &str = "AF";
const APP_DIR: &str = "address-finder";
const CONFIG_FILE: &str = "config.toml";

/// Root configuration composed of all subsystem configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    // Lookup behaviour and presentation
    #[serde(flatten)]
    pub lookup: LookupConfig,

    // HTTP client tuning
    #[serde(flatten)]
    pub network: NetworkConfig,

    // Logging configuration
    #[serde(flatten)]
    pub logging: LoggingConfig,
}

/// `address-finder/config.toml` under the platform config directory
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path` (or the user config file) and the process
/// environment. An explicit path must exist; the user config file may not.
pub fn load(path: Option<&Path>) -> Result<Config> {
    load_with_env(path, None)
}

/// Like [`load`], reading `AF_*` variables from `env` instead of the process
/// environment when given.
pub fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Config> {
    let mut builder = config::Config::builder();

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(config::File::from(path).required(true));
        }
        None => {
            if let Some(path) = user_config_path() {
                debug!(path = %path.display(), "loading user config file if present");
                builder = builder.add_source(config::File::from(path.as_path()).required(false));
            }
        }
    }

    // AF_DEBOUNCE_MS -> "debounce-ms"
    let environment = config::Environment::with_prefix(ENV_PREFIX)
        .convert_case(config::Case::Kebab)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("countries")
        .source(env);

    let built = builder
        .add_source(environment)
        .build()
        .context("failed to read address-finder configuration")?;
    built
        .try_deserialize::<Config>()
        .context("invalid address-finder configuration")
}
