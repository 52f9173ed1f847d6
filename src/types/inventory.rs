// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::constants::conditions::SPEC_SYNCED;
use crate::types::condition::{is_condition_true, Condition, HasConditions};

/// Reference to a namespaced object, as the operator expects it on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamespacedName {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "dbaas.redhat.com", version = "v1alpha1", kind = "DBaaSInventory")]
#[kube(namespaced)]
#[kube(status = "DBaaSInventoryStatus")]
#[serde(rename_all = "camelCase")]
pub struct DBaaSInventorySpec {
    /// Provider-type discriminator the operator dispatches on
    pub provider_ref: NamespacedName,
    /// The secret holding this provider account's credentials
    pub credentials_ref: NamespacedName,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DBaaSInventoryStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    /// Service instances discovered on the provider account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<Vec<DatabaseInstance>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInstance {
    #[serde(rename = "instanceID")]
    pub instance_id: String,
    pub name: String,
}

impl DBaaSInventory {
    /// Check if the operator has synced this provider account
    pub fn is_spec_synced(&self) -> bool {
        is_condition_true(self.conditions(), SPEC_SYNCED)
    }

    /// First instance discovered on the account, if any
    pub fn first_instance(&self) -> Option<&DatabaseInstance> {
        self.status
            .as_ref()
            .and_then(|s| s.instances.as_deref())
            .and_then(|instances| instances.first())
    }
}

impl HasConditions for DBaaSInventory {
    fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_inventory(status: Option<DBaaSInventoryStatus>) -> DBaaSInventory {
        DBaaSInventory {
            metadata: ObjectMeta {
                name: Some("provider-acct-test-e2e-crunchy".to_string()),
                namespace: Some("openshift-dbaas-operator".to_string()),
                ..Default::default()
            },
            spec: DBaaSInventorySpec {
                provider_ref: NamespacedName {
                    name: "crunchy-bridge-registration".to_string(),
                    namespace: Some("openshift-dbaas-operator".to_string()),
                },
                credentials_ref: NamespacedName {
                    name: "dbaas-secret-e2e-crunchy".to_string(),
                    namespace: Some("openshift-dbaas-operator".to_string()),
                },
            },
            status,
        }
    }

    fn synced_condition(status: &str) -> Condition {
        Condition {
            condition_type: "SpecSynced".to_string(),
            status: status.to_string(),
            reason: None,
            message: None,
        }
    }

    #[test]
    fn test_is_spec_synced_true() {
        let inventory = make_inventory(Some(DBaaSInventoryStatus {
            conditions: Some(vec![synced_condition("True")]),
            instances: None,
        }));
        assert!(inventory.is_spec_synced());
    }

    #[test]
    fn test_is_spec_synced_at_non_first_index() {
        let inventory = make_inventory(Some(DBaaSInventoryStatus {
            conditions: Some(vec![
                Condition {
                    condition_type: "InstanceListSynced".to_string(),
                    status: "False".to_string(),
                    reason: None,
                    message: None,
                },
                synced_condition("True"),
            ]),
            instances: None,
        }));
        assert!(inventory.is_spec_synced());
    }

    #[test]
    fn test_is_spec_synced_no_status() {
        let inventory = make_inventory(None);
        assert!(!inventory.is_spec_synced());
    }

    #[test]
    fn test_first_instance() {
        let inventory = make_inventory(Some(DBaaSInventoryStatus {
            conditions: None,
            instances: Some(vec![
                DatabaseInstance {
                    instance_id: "inst-1".to_string(),
                    name: "db-one".to_string(),
                },
                DatabaseInstance {
                    instance_id: "inst-2".to_string(),
                    name: "db-two".to_string(),
                },
            ]),
        }));
        assert_eq!(inventory.first_instance().unwrap().instance_id, "inst-1");
    }

    #[test]
    fn test_first_instance_none_discovered() {
        let inventory = make_inventory(Some(DBaaSInventoryStatus::default()));
        assert!(inventory.first_instance().is_none());
    }

    #[test]
    fn test_spec_wire_format() {
        let inventory = make_inventory(None);
        let value = serde_json::to_value(&inventory.spec).unwrap();
        assert_eq!(
            value["providerRef"]["name"],
            "crunchy-bridge-registration"
        );
        assert_eq!(value["credentialsRef"]["name"], "dbaas-secret-e2e-crunchy");
    }

    #[test]
    fn test_instance_wire_format() {
        let instance: DatabaseInstance = serde_json::from_value(serde_json::json!({
            "instanceID": "inst-42",
            "name": "db"
        }))
        .unwrap();
        assert_eq!(instance.instance_id, "inst-42");
    }
}
