// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use af_cli::{run, Cli, Parser};
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
