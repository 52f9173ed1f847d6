// SPDX-License-Identifier: Apache-2.0

/// API group and version served by the DBaaS operator
pub const API_GROUP: &str = "dbaas.redhat.com";
pub const API_VERSION: &str = "v1alpha1";

/// Kind whose availability proves the operator is installed
pub const PLATFORM_KIND: &str = "DBaaSPlatform";

/// Namespace the operator watches and where all test resources are created
pub const OPERATOR_NAMESPACE: &str = "openshift-dbaas-operator";

/// Environment variable whose presence indicates in-cluster execution
pub const IN_CLUSTER_ENV: &str = "KUBERNETES_SERVICE_HOST";

/// The centrally-stored CI credential bundle
pub mod ci_secret {
    /// Namespace holding the CI secret
    pub const NAMESPACE: &str = "osde2e-ci-secrets";
    /// Name of the CI secret
    pub const NAME: &str = "ci-secrets";
    /// Key holding the comma-separated provider identifiers
    pub const PROVIDER_LIST_KEY: &str = "providerList";
}

/// Name prefixes for resources created per provider
pub mod names {
    /// Prefix for the per-provider credential secret
    pub const CREDENTIALS_SECRET_PREFIX: &str = "dbaas-secret-e2e-";
    /// Prefix for the per-provider inventory resource
    pub const INVENTORY_PREFIX: &str = "provider-acct-test-e2e-";
}

/// Identity labels stamped on created inventories
pub mod labels {
    pub const RELATED_TO_KEY: &str = "related-to";
    pub const RELATED_TO_VALUE: &str = "dbaas-operator";
    pub const TYPE_KEY: &str = "type";
    pub const TYPE_VALUE: &str = "dbaas-vendor-service";
}

/// Status condition tags reported by the operator
pub mod conditions {
    /// Inventory condition set once the provider account is synced
    pub const SPEC_SYNCED: &str = "SpecSynced";
    /// Connection condition set once the binding is usable
    pub const READY_FOR_BINDING: &str = "ReadyForBinding";
    pub const STATUS_TRUE: &str = "True";
}

/// Credential field naming the provider-type discriminator
pub const PROVIDER_TYPE_FIELD: &str = "providerType";

/// Readiness polling defaults
pub mod poll {
    /// Total window to wait for a condition, in seconds
    pub const TIMEOUT_SECS: u64 = 60;
    /// Sleep between attempts, in seconds
    pub const INTERVAL_SECS: u64 = 5;
}

/// Web console discovery and dashboard verification
pub mod console {
    /// Namespace of the console Route
    pub const ROUTE_NAMESPACE: &str = "openshift-console";
    /// Name of the console Route
    pub const ROUTE_NAME: &str = "console";
    /// Cookie the console accepts for session authentication
    pub const SESSION_COOKIE: &str = "openshift-session-token";
    /// Dashboard path under the console host
    pub const DASHBOARD_PATH: &str = "/k8s/ns/openshift-dbaas-operator/rhoda-admin-dashboard";
    /// Visible text of the navigation entry to follow
    pub const NAV_ENTRY_TEXT: &str = "Database Access";
    /// Expected heading on the page behind the navigation entry
    pub const PAGE_HEADING: &str = "Database Access";
}
