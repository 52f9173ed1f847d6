// SPDX-License-Identifier: Apache-2.0
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::constants;
use crate::readiness::PollSettings;

/// Command-line surface of the suite.
///
/// Every flag has an environment fallback so the binary runs unchanged as an
/// in-cluster CI job, where only env vars are practical.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dbaas-e2e", about = "End-to-end validation of the DBaaS operator")]
pub struct Cli {
    /// Path to a kubeconfig file; ignored when running in-cluster
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Namespace the operator watches and where test resources are created
    #[arg(long)]
    pub namespace: Option<String>,

    /// Console session token; the console check is skipped when absent
    #[arg(long)]
    pub console_token: Option<String>,

    /// Console base URL, overriding Route discovery
    #[arg(long)]
    pub console_url: Option<Url>,

    /// Skip TLS certificate verification for the console check
    #[arg(long)]
    pub insecure_skip_tls_verify: bool,

    /// Leave created resources in place after the run
    #[arg(long)]
    pub skip_cleanup: bool,

    /// Total readiness wait per resource, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Sleep between readiness polls, in seconds
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

/// Resolved suite configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub kubeconfig: Option<PathBuf>,
    pub namespace: String,
    pub ci_secret_namespace: String,
    pub ci_secret_name: String,
    pub poll: PollSettings,
    pub console_token: Option<String>,
    pub console_url: Option<Url>,
    pub insecure_skip_tls_verify: bool,
    pub cleanup: bool,
}

impl Config {
    /// Resolve configuration from CLI flags with environment fallbacks
    pub fn from_cli(cli: Cli) -> Self {
        let namespace = cli
            .namespace
            .or_else(|| env::var("DBAAS_E2E_NAMESPACE").ok())
            .unwrap_or_else(|| constants::OPERATOR_NAMESPACE.to_string());

        let ci_secret_namespace = env::var("DBAAS_E2E_CI_SECRET_NAMESPACE")
            .unwrap_or_else(|_| constants::ci_secret::NAMESPACE.to_string());
        let ci_secret_name = env::var("DBAAS_E2E_CI_SECRET_NAME")
            .unwrap_or_else(|_| constants::ci_secret::NAME.to_string());

        let timeout_secs = cli
            .timeout_secs
            .or_else(|| parse_env("DBAAS_E2E_TIMEOUT_SECS"))
            .unwrap_or(constants::poll::TIMEOUT_SECS);
        let interval_secs = cli
            .interval_secs
            .or_else(|| parse_env("DBAAS_E2E_INTERVAL_SECS"))
            .unwrap_or(constants::poll::INTERVAL_SECS);

        let console_token = cli
            .console_token
            .or_else(|| env::var("CONSOLE_SESSION_TOKEN").ok());

        Config {
            kubeconfig: cli.kubeconfig,
            namespace,
            ci_secret_namespace,
            ci_secret_name,
            poll: PollSettings {
                timeout: Duration::from_secs(timeout_secs),
                interval: Duration::from_secs(interval_secs),
                fail_fast: false,
            },
            console_token,
            console_url: cli.console_url,
            insecure_skip_tls_verify: cli.insecure_skip_tls_verify,
            cleanup: !cli.skip_cleanup,
        }
    }

    /// True when running inside a pod, detected by the well-known env var
    pub fn in_cluster() -> bool {
        env::var(constants::IN_CLUSTER_ENV).is_ok()
    }
}

fn parse_env(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
