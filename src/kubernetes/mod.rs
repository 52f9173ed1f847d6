// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and CRD discovery.

pub mod client;
pub mod crd;

pub use client::build_client;
pub use crd::ensure_platform_crd;
