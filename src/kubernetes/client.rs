// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and kubeconfig selection

use std::path::PathBuf;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};

/// Create a client for the cluster under test.
///
/// In-cluster execution (detected by KUBERNETES_SERVICE_HOST) uses the
/// service-account token; otherwise the kubeconfig from the `--kubeconfig`
/// flag or `$HOME/.kube/config` is used.
pub async fn build_client(config: &Config) -> Result<Client> {
    if Config::in_cluster() {
        debug!("In-cluster execution detected, using service-account credentials");
        return Client::try_default()
            .await
            .map_err(|e| Error::Kubeconfig(format!("Failed to build in-cluster client: {}", e)));
    }

    let path = kubeconfig_path(config)?;
    info!("Using kubeconfig at {}", path.display());
    create_client_from_kubeconfig(&path).await
}

fn kubeconfig_path(config: &Config) -> Result<PathBuf> {
    if let Some(path) = &config.kubeconfig {
        return Ok(path.clone());
    }
    let home = std::env::var("HOME")
        .map_err(|_| Error::Kubeconfig("HOME is not set and no --kubeconfig given".to_string()))?;
    Ok(PathBuf::from(home).join(".kube").join("config"))
}

/// Create a Kubernetes client from a kubeconfig file
async fn create_client_from_kubeconfig(path: &PathBuf) -> Result<Client> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        Error::Kubeconfig(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    let client_config = KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| Error::Kubeconfig(format!("Failed to create config: {}", e)))?;

    Client::try_from(client_config)
        .map_err(|e| Error::Kubeconfig(format!("Failed to create client: {}", e)))
}
