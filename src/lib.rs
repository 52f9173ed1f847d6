// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod console;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod kubernetes;
pub mod provision;
pub mod readiness;
pub mod scenario;
pub mod types;

#[cfg(test)]
pub mod test_utils;
