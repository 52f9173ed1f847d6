// SPDX-License-Identifier: Apache-2.0

//! Polling a resource's status conditions until one becomes True.
//!
//! The only retry in the suite lives here: create operations are never
//! retried, readiness is.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::condition::{is_condition_true, Condition};

/// Timing and failure policy for a readiness poll.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Total window to wait before giving up
    pub timeout: Duration,
    /// Sleep between attempts
    pub interval: Duration,
    /// Abort on the first fetch error instead of treating it as a failed attempt
    pub fail_fast: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(crate::constants::poll::TIMEOUT_SECS),
            interval: Duration::from_secs(crate::constants::poll::INTERVAL_SECS),
            fail_fast: false,
        }
    }
}

/// Repeatedly fetch a resource's condition list until a condition of
/// `condition_type` reports status "True", or the timeout elapses.
///
/// The first fetch happens immediately with no initial delay. Every attempt
/// searches the full condition list; the operator gives no ordering guarantee.
/// A fetch error counts as a failed attempt unless `fail_fast` is set.
/// `resource` only labels errors and log lines (e.g. `dbaasinventory/foo`).
pub async fn wait_for_condition<F, Fut>(
    resource: &str,
    condition_type: &str,
    settings: PollSettings,
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<Condition>>>,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        match fetch().await {
            Ok(conditions) => {
                if is_condition_true(&conditions, condition_type) {
                    debug!(
                        resource,
                        condition_type, attempts, "condition observed True"
                    );
                    return Ok(());
                }
                debug!(resource, condition_type, attempts, "condition not yet True");
            }
            Err(e) if settings.fail_fast => {
                return Err(Error::PollFetch {
                    resource: resource.to_string(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!(resource, attempts, "fetch failed, treating as failed attempt: {}", e);
            }
        }

        if start.elapsed() >= settings.timeout {
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(Error::PollCancelled {
                    resource: resource.to_string(),
                });
            }
            _ = sleep(settings.interval) => {}
        }

        if start.elapsed() >= settings.timeout {
            break;
        }
    }

    Err(Error::ReadinessTimeout {
        resource: resource.to_string(),
        condition_type: condition_type.to_string(),
        timeout: settings.timeout,
        attempts,
    })
}
