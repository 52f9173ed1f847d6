// SPDX-License-Identifier: Apache-2.0

//! Grouping of the flat CI secret into per-provider credential records.

use std::collections::BTreeMap;

use k8s_openapi::ByteString;

use crate::constants::{names::CREDENTIALS_SECRET_PREFIX, PROVIDER_TYPE_FIELD};

/// Credentials for one provider account, grouped out of the CI secret.
///
/// Built once per provider and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ProviderAccount {
    pub provider_name: String,
    /// Name of the credential secret this account will be written to
    pub secret_name: String,
    /// Credential field name to secret byte value
    pub secret_data: BTreeMap<String, ByteString>,
}

impl ProviderAccount {
    /// The provider-type discriminator stored under the `providerType` field
    pub fn provider_type(&self) -> Option<String> {
        self.secret_data
            .get(PROVIDER_TYPE_FIELD)
            .and_then(|v| String::from_utf8(v.0.clone()).ok())
    }
}

/// Split the `providerList` field into provider identifiers.
///
/// Mirrors the CI secret contract exactly: split on `,` with no trimming,
/// deduplication, or validation.
pub fn split_provider_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Group the flat CI secret data into one record per provider.
///
/// A key belongs to a provider when the provider name is a strict prefix
/// followed by the `-` separator; `awsx-user` never matches provider `aws`.
/// The output field name is the first `-`-delimited segment after the
/// provider prefix, so any further segments are dropped. A provider with no
/// matching keys still yields a record with an empty field map.
pub fn extract_provider_accounts(
    data: &BTreeMap<String, ByteString>,
    providers: &[String],
) -> Vec<ProviderAccount> {
    providers
        .iter()
        .map(|provider_name| {
            let mut secret_data = BTreeMap::new();
            for (key, value) in data {
                let Some(rest) = key
                    .strip_prefix(provider_name.as_str())
                    .and_then(|r| r.strip_prefix('-'))
                else {
                    continue;
                };
                // Field name is the first '-'-delimited segment after the
                // provider prefix; anything past it is dropped.
                let field = rest.split('-').next().unwrap_or(rest);
                secret_data.insert(field.to_string(), value.clone());
            }
            ProviderAccount {
                provider_name: provider_name.clone(),
                secret_name: format!("{}{}", CREDENTIALS_SECRET_PREFIX, provider_name),
                secret_data,
            }
        })
        .collect()
}
