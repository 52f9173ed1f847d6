// SPDX-License-Identifier: Apache-2.0

//! Operator installation precondition

use kube::{discovery::Discovery, Client};
use tracing::info;

use crate::constants::{API_GROUP, API_VERSION, PLATFORM_KIND};
use crate::error::{Error, Result};

/// Verify the DBaaS platform CRD is served.
///
/// Absence means the operator is not installed; the run aborts rather than
/// waiting for an installation that will not happen.
pub async fn ensure_platform_crd(client: &Client) -> Result<()> {
    if check_platform_crd_exists(client).await? {
        info!(
            "{}.{}/{} CRD is available",
            PLATFORM_KIND, API_GROUP, API_VERSION
        );
        Ok(())
    } else {
        Err(Error::CrdMissing {
            kind: PLATFORM_KIND.to_string(),
            group: API_GROUP.to_string(),
            version: API_VERSION.to_string(),
        })
    }
}

/// Check if the platform CRD exists by attempting to discover it.
async fn check_platform_crd_exists(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[API_GROUP])
        .run()
        .await?;

    for group in discovery.groups() {
        if group.name() == API_GROUP {
            for (ar, _) in group.recommended_resources() {
                if ar.kind == PLATFORM_KIND && ar.version == API_VERSION {
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}
