// SPDX-License-Identifier: Apache-2.0

//! The end-to-end scenario, parameterized by [`Config`].
//!
//! One runner replaces the family of near-duplicate CI scripts this suite
//! grew out of. Setup and precondition failures abort the run; per-provider
//! failures are collected so every provider's outcome is reported.

use kube::{Api, Client};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use k8s_openapi::api::core::v1::Secret;

use crate::config::Config;
use crate::console;
use crate::constants::ci_secret::PROVIDER_LIST_KEY;
use crate::constants::conditions::{READY_FOR_BINDING, SPEC_SYNCED};
use crate::credentials::{extract_provider_accounts, split_provider_list, ProviderAccount};
use crate::error::{Error, Result};
use crate::kubernetes::ensure_platform_crd;
use crate::provision::{
    create_connection, create_provider_resources, inventory_name, teardown_provider_resources,
};
use crate::readiness::wait_for_condition;
use crate::types::{DBaaSConnection, DBaaSInventory, HasConditions};

/// Outcome of one provider's secret/inventory/connection lifecycle
#[derive(Debug)]
pub struct ProviderOutcome {
    pub provider_name: String,
    pub result: Result<()>,
}

/// Everything the run observed, one entry per provider plus the console check
#[derive(Debug, Default)]
pub struct ScenarioReport {
    pub providers: Vec<ProviderOutcome>,
    pub console: Option<Result<()>>,
}

impl ScenarioReport {
    pub fn is_success(&self) -> bool {
        self.providers.iter().all(|o| o.result.is_ok())
            && self.console.as_ref().map(|r| r.is_ok()).unwrap_or(true)
    }

    /// Human-readable description of every failure in the run
    pub fn failures(&self) -> Vec<String> {
        let mut failures: Vec<String> = self
            .providers
            .iter()
            .filter_map(|o| {
                o.result
                    .as_ref()
                    .err()
                    .map(|e| format!("provider '{}': {}", o.provider_name, e))
            })
            .collect();
        if let Some(Err(e)) = &self.console {
            failures.push(format!("console: {}", e));
        }
        failures
    }
}

pub struct Scenario {
    client: Client,
    config: Config,
    cancel: CancellationToken,
}

impl Scenario {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts in-flight readiness polls when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the whole scenario and report every outcome.
    ///
    /// Returns `Err` only for setup and precondition failures (no client, CRD
    /// absent, CI secret unreadable); provider and console failures land in
    /// the report.
    pub async fn run(&self) -> Result<ScenarioReport> {
        ensure_platform_crd(&self.client).await?;

        let accounts = self.load_provider_accounts().await?;
        info!("Validating {} provider account(s)", accounts.len());

        let mut report = ScenarioReport::default();
        for account in &accounts {
            let mut connection_names = Vec::new();
            let result = self.run_provider(account, &mut connection_names).await;
            if let Err(e) = &result {
                warn!("Provider '{}' failed: {}", account.provider_name, e);
            }
            report.providers.push(ProviderOutcome {
                provider_name: account.provider_name.clone(),
                result,
            });

            if self.config.cleanup {
                if let Err(e) = teardown_provider_resources(
                    &self.client,
                    account,
                    &connection_names,
                    &self.config.namespace,
                )
                .await
                {
                    warn!(
                        "Teardown failed for provider '{}': {}",
                        account.provider_name, e
                    );
                }
            }
        }

        if self.config.console_token.is_some() {
            report.console = Some(self.run_console_check().await);
        }

        Ok(report)
    }

    /// Fetch the CI secret and group its fields into provider accounts
    #[instrument(skip(self))]
    pub async fn load_provider_accounts(&self) -> Result<Vec<ProviderAccount>> {
        let secrets: Api<Secret> =
            Api::namespaced(self.client.clone(), &self.config.ci_secret_namespace);
        let ci_secret = secrets.get(&self.config.ci_secret_name).await?;

        let missing_field = |field: &str| Error::MissingSecretField {
            namespace: self.config.ci_secret_namespace.clone(),
            name: self.config.ci_secret_name.clone(),
            field: field.to_string(),
        };

        let data = ci_secret.data.ok_or_else(|| missing_field(PROVIDER_LIST_KEY))?;
        let provider_list = data
            .get(PROVIDER_LIST_KEY)
            .ok_or_else(|| missing_field(PROVIDER_LIST_KEY))?;
        let provider_list = String::from_utf8(provider_list.0.clone())
            .map_err(|_| missing_field(PROVIDER_LIST_KEY))?;

        let providers = split_provider_list(&provider_list);
        info!("Provider list: {:?}", providers);

        Ok(extract_provider_accounts(&data, &providers))
    }

    /// Provision one provider and wait for its resources to become ready.
    /// Names of connections actually created are recorded for teardown even
    /// when a later step fails.
    #[instrument(skip(self, account, connection_names), fields(provider = %account.provider_name))]
    async fn run_provider(
        &self,
        account: &ProviderAccount,
        connection_names: &mut Vec<String>,
    ) -> Result<()> {
        let namespace = &self.config.namespace;
        create_provider_resources(&self.client, account, namespace).await?;

        let inventories: Api<DBaaSInventory> = Api::namespaced(self.client.clone(), namespace);
        let name = inventory_name(&account.provider_name);
        let resource = format!("dbaasinventory/{}", name);
        wait_for_condition(&resource, SPEC_SYNCED, self.config.poll, &self.cancel, || {
            let api = inventories.clone();
            let name = name.clone();
            async move { Ok(api.get(&name).await?.conditions().to_vec()) }
        })
        .await?;

        // Refetch: the instance list may have been filled after the sync
        // condition flipped.
        let inventory = inventories.get(&name).await?;
        let Some(instance) = inventory.first_instance() else {
            info!(
                "No instances discovered for provider '{}', skipping connection",
                account.provider_name
            );
            return Ok(());
        };

        create_connection(&self.client, &name, instance, namespace).await?;
        connection_names.push(instance.name.clone());

        let connections: Api<DBaaSConnection> = Api::namespaced(self.client.clone(), namespace);
        let resource = format!("dbaasconnection/{}", instance.name);
        let connection_name = instance.name.clone();
        wait_for_condition(
            &resource,
            READY_FOR_BINDING,
            self.config.poll,
            &self.cancel,
            || {
                let api = connections.clone();
                let name = connection_name.clone();
                async move { Ok(api.get(&name).await?.conditions().to_vec()) }
            },
        )
        .await?;

        info!("Provider '{}' validated", account.provider_name);
        Ok(())
    }

    /// Verify the console dashboard, discovering its URL when not configured
    async fn run_console_check(&self) -> Result<()> {
        let base_url = match &self.config.console_url {
            Some(url) => url.clone(),
            None => console::discover_console_url(&self.client).await?,
        };
        let http = console::http_client(&self.config)?;
        console::verify_dashboard(&http, &self.config, &base_url).await
    }
}
