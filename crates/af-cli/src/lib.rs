// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! address-finder command-line interface

pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use af_client_api::AddressService;
use af_logging::{redact, CliLoggingArgs};
use af_rest_client::{ApiKey, RestClient, DEFAULT_API_URL};
use af_rest_mock_client::MockAddressService;
use af_tui::{run_finder, ClickAwayPolicy, FinderDependencies, Theme};
use anyhow::{Context, Result};
use tracing::info;
use url::Url;

pub use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "address-finder")]
#[command(about = "Search for a postal address and print the selected record as JSON")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Key for the address capture service
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL of the address capture service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Locale passed to the service, e.g. en-GB
    #[arg(long)]
    pub locale: Option<String>,

    /// Maximum number of candidates per lookup
    #[arg(long)]
    pub limit: Option<u32>,

    /// Show results inside the widget instead of as an overlay
    #[arg(long)]
    pub inline: bool,

    /// Quiet interval after the last keystroke before searching
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Shortest query that is sent to the service
    #[arg(long, value_name = "CHARS")]
    pub min_query_length: Option<usize>,

    /// Restrict results to these ISO country codes
    #[arg(long, value_delimiter = ',', value_name = "CODES")]
    pub countries: Vec<String>,

    /// Text shown while the input is empty
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Close the list when clicking outside the widget
    #[arg(long)]
    pub dismiss_on_click_away: bool,

    /// Seconds before a lookup or retrieve call is abandoned
    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Use built-in sample data instead of the remote service
    #[arg(long)]
    pub mock: bool,

    #[command(flatten)]
    pub logging: CliLoggingArgs,
}

impl Cli {
    /// Layer the flags given on the command line over `config`.
    pub fn apply(&self, config: &mut Config) {
        let lookup = &mut config.lookup;
        if let Some(api_key) = &self.api_key {
            lookup.api_key = Some(api_key.clone());
        }
        if let Some(api_url) = &self.api_url {
            lookup.api_url = Some(api_url.clone());
        }
        if let Some(locale) = &self.locale {
            lookup.locale = locale.clone();
        }
        if let Some(limit) = self.limit {
            lookup.limit = limit;
        }
        if self.inline {
            lookup.inline = true;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            lookup.debounce_ms = debounce_ms;
        }
        if let Some(min_query_length) = self.min_query_length {
            lookup.min_query_length = min_query_length;
        }
        if !self.countries.is_empty() {
            lookup.countries = self.countries.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            lookup.placeholder = Some(placeholder.clone());
        }
        if self.dismiss_on_click_away {
            lookup.click_away = ClickAwayPolicy::Dismiss;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.network.request_timeout_secs = Some(secs);
        }
    }

    /// Resolve the final configuration: defaults, file, environment, flags.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = config::load(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }
}

/// Build the address service the finder talks to.
pub fn build_service(config: &Config, mock: bool) -> Result<Arc<dyn AddressService>> {
    if mock {
        info!("using built-in sample addresses");
        return Ok(Arc::new(MockAddressService::with_mock_data()));
    }

    let api_key = config
        .lookup
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .context("an API key is required: pass --api-key, set AF_API_KEY, or run with --mock")?;
    let api_url = config.lookup.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
    let base_url = Url::parse(api_url).with_context(|| format!("invalid --api-url {api_url}"))?;

    info!(api_url = %base_url, api_key = %redact(api_key), "using address capture service");
    let client = RestClient::new(base_url, ApiKey::new(api_key), &config.network)?;
    Ok(Arc::new(client))
}

/// Run the finder and print the selected record.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    config
        .logging
        .under(cli.logging.clone())
        .init("address-finder", true)?;

    let service = build_service(&config, cli.mock)?;
    let mut deps = FinderDependencies::new(service, config.lookup.clone());
    if std::env::var_os("NO_COLOR").is_some() {
        deps.theme = Theme::plain();
    }

    match run_finder(deps).await? {
        Some(record) => {
            info!(id = %record.id, "address selected");
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        None => info!("finder closed without a selection"),
    }
    Ok(())
}
