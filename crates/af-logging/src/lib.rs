// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging setup for the address-finder binaries
//!
//! A binary resolves its flags (and the `log-*` config keys) into a
//! [`LogSink`], then installs one global `tracing` subscriber writing there.
//! The finder owns the terminal, so its sink is always a file. `RUST_LOG`
//! replaces the computed filter when set.

pub mod logging_config;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use logging_config::LoggingConfig;

const PRODUCT_DIR: &str = "address-finder";

/// Crates whose events pass the filter at the requested level; everything
/// else is held at `warn`.
const OWN_TARGETS: [&str; 4] = ["af_cli", "af_tui", "af_rest_client", "af_rest_mock_client"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One human-readable line per event
    #[default]
    Plaintext,
    /// One JSON object per event
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Where log events are written
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    /// Appended to; parent directories are created on install
    File(PathBuf),
}

/// Logging flags; flatten into a binary's CLI with `#[command(flatten)]`
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Verbosity of address-finder's own crates [default: info]
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Log line format [default: plaintext]
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Directory for log files [default: platform log directory]
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Log file name, or an absolute path
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Resolve the sink for `component`. A binary that draws on the terminal
    /// (`owns_terminal`) never logs to stdout.
    pub fn sink(&self, component: &str, owns_terminal: bool) -> LogSink {
        if !owns_terminal && self.log_file.is_none() && self.log_dir.is_none() {
            return LogSink::Stdout;
        }
        let dir = self
            .log_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(standard_log_dir);
        let path = match self.log_file.as_deref().map(Path::new) {
            Some(file) if file.is_absolute() => file.to_path_buf(),
            Some(file) => dir.join(file),
            None => dir.join(format!("{component}.log")),
        };
        LogSink::File(path)
    }

    /// Install the global subscriber for `component`.
    pub fn init(self, component: &str, owns_terminal: bool) -> anyhow::Result<()> {
        let sink = self.sink(component, owns_terminal);
        let level = LevelFilter::from(self.log_level.unwrap_or_default());
        install(&sink, component, level, self.log_format.unwrap_or_default())
    }
}

/// `~/Library/Logs/address-finder` on macOS, `<data dir>/address-finder` elsewhere
pub fn standard_log_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    let base = dirs::home_dir().map(|home| home.join("Library").join("Logs"));
    #[cfg(not(target_os = "macos"))]
    let base = dirs::data_dir().or_else(dirs::home_dir);

    base.unwrap_or_else(std::env::temp_dir).join(PRODUCT_DIR)
}

/// Install the global subscriber writing to `sink`.
pub fn install(sink: &LogSink, component: &str, level: LevelFilter, format: LogFormat) -> anyhow::Result<()> {
    match sink {
        LogSink::Stdout => install_with_writer(component, level, format, io::stdout),
        LogSink::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            install_with_writer(component, level, format, file)
        }
    }
}

/// Install the global subscriber writing to any `MakeWriter`.
pub fn install_with_writer<W>(component: &str, level: LevelFilter, format: LogFormat, writer: W) -> anyhow::Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(filter_directives(component, level))?,
    };
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt.json().flatten_event(true)).try_init()?,
        LogFormat::Plaintext => registry.with(fmt.compact()).try_init()?,
    }
    Ok(())
}

fn filter_directives(component: &str, level: LevelFilter) -> String {
    let binary_target = component.replace('-', "_");
    std::iter::once("warn".to_string())
        .chain(
            std::iter::once(binary_target.as_str())
                .chain(OWN_TARGETS)
                .map(|target| format!("{target}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

/// Mask a secret for logging, keeping only its last four characters.
///
/// ```rust
/// use af_logging::redact;
///
/// assert_eq!(redact("AA11-BB22-CC33-DD44"), "…DD44");
/// tracing::info!(api_key = %redact("AA11-BB22-CC33-DD44"), "service key configured");
/// ```
pub fn redact(secret: impl std::fmt::Display) -> String {
    let secret = secret.to_string();
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "[REDACTED]".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_fully_hidden() {
        assert_eq!(redact("1234"), "[REDACTED]");
        assert_eq!(redact("AA11-BB22-CC33-DD44"), "…DD44");
    }

    #[test]
    fn terminal_owners_never_log_to_stdout() {
        let args = CliLoggingArgs::default();
        assert_eq!(args.sink("af-probe", false), LogSink::Stdout);
        assert_eq!(
            args.sink("address-finder", true),
            LogSink::File(standard_log_dir().join("address-finder.log"))
        );
    }

    #[test]
    fn log_file_placement() {
        let args = CliLoggingArgs {
            log_dir: Some("/tmp/af-logs".into()),
            log_file: Some("nested/finder.log".into()),
            ..Default::default()
        };
        assert_eq!(
            args.sink("x", false),
            LogSink::File(PathBuf::from("/tmp/af-logs/nested/finder.log"))
        );

        let dir = tempfile::tempdir().expect("tempdir");
        let absolute = dir.path().join("af.log");
        let args = CliLoggingArgs {
            log_dir: Some("/ignored".into()),
            log_file: Some(absolute.to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert_eq!(args.sink("x", true), LogSink::File(absolute));
    }

    #[test]
    fn levels_map_onto_filters() {
        assert_eq!(LevelFilter::from(LogLevel::default()), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::OFF);
    }

    #[test]
    fn directives_cover_the_binary_and_own_crates() {
        assert_eq!(
            filter_directives("address-finder", LevelFilter::DEBUG),
            "warn,address_finder=debug,af_cli=debug,af_tui=debug,af_rest_client=debug,af_rest_mock_client=debug"
        );
    }
}
