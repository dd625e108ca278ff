// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging section of the layered configuration

use serde::{Deserialize, Serialize};

use crate::{CliLoggingArgs, LogFormat, LogLevel};

/// Logging configuration as read from files and `AF_*` environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl LoggingConfig {
    /// Fill the unset command-line options from this configuration.
    /// Flags given on the command line win.
    pub fn under(&self, args: CliLoggingArgs) -> CliLoggingArgs {
        CliLoggingArgs {
            log_level: args.log_level.or(self.log_level),
            log_format: args.log_format.or(self.log_format),
            log_dir: args.log_dir.or_else(|| self.log_dir.clone()),
            log_file: args.log_file.or_else(|| self.log_file.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins_over_config() {
        let config = LoggingConfig {
            log_level: Some(LogLevel::Debug),
            log_format: Some(LogFormat::Json),
            log_dir: Some("/var/log/af".into()),
            log_file: None,
        };
        let args = CliLoggingArgs {
            log_level: Some(LogLevel::Warn),
            ..Default::default()
        };
        let merged = config.under(args);
        assert_eq!(merged.log_level, Some(LogLevel::Warn));
        assert_eq!(merged.log_format, Some(LogFormat::Json));
        assert_eq!(merged.log_dir.as_deref(), Some("/var/log/af"));
        assert_eq!(merged.log_file, None);
    }
}
