// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("CRD for {kind}.{group}/{version} is not installed")]
    CrdMissing {
        kind: String,
        group: String,
        version: String,
    },

    #[error("Secret {namespace}/{name} is missing field '{field}'")]
    MissingSecretField {
        namespace: String,
        name: String,
        field: String,
    },

    #[error(
        "Timed out after {timeout:?} ({attempts} attempts) waiting for condition \
         '{condition_type}' to become True on {resource}"
    )]
    ReadinessTimeout {
        resource: String,
        condition_type: String,
        timeout: Duration,
        attempts: u32,
    },

    #[error("Fetch failed while polling {resource}: {message}")]
    PollFetch { resource: String, message: String },

    #[error("Readiness poll for {resource} was cancelled")]
    PollCancelled { resource: String },

    #[error("Console check failed: {0}")]
    Console(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
