// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use dbaas_e2e::config::{Cli, Config};
use dbaas_e2e::kubernetes::build_client;
use dbaas_e2e::scenario::Scenario;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_cli(cli);
    info!(
        "Starting DBaaS operator end-to-end validation in namespace {}",
        config.namespace
    );

    let client = build_client(&config).await?;
    info!("Connected to Kubernetes cluster");

    let scenario = Scenario::new(client, config);
    let report = scenario.run().await?;

    for outcome in &report.providers {
        match &outcome.result {
            Ok(()) => info!("provider '{}': ok", outcome.provider_name),
            Err(e) => error!("provider '{}': {}", outcome.provider_name, e),
        }
    }
    if let Some(result) = &report.console {
        match result {
            Ok(()) => info!("console: ok"),
            Err(e) => error!("console: {}", e),
        }
    }

    if !report.is_success() {
        anyhow::bail!("{} check(s) failed", report.failures().len());
    }

    info!("All checks passed");
    Ok(())
}
