// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::constants::conditions::READY_FOR_BINDING;
use crate::types::condition::{is_condition_true, Condition, HasConditions};
use crate::types::inventory::NamespacedName;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "dbaas.redhat.com", version = "v1alpha1", kind = "DBaaSConnection")]
#[kube(namespaced)]
#[kube(status = "DBaaSConnectionStatus")]
#[serde(rename_all = "camelCase")]
pub struct DBaaSConnectionSpec {
    /// The inventory whose instance is being bound
    pub inventory_ref: NamespacedName,
    #[serde(rename = "instanceID")]
    pub instance_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DBaaSConnectionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

impl DBaaSConnection {
    pub fn is_ready_for_binding(&self) -> bool {
        is_condition_true(self.conditions(), READY_FOR_BINDING)
    }
}

impl HasConditions for DBaaSConnection {
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

    fn make_connection(conditions: Option<Vec<Condition>>) -> DBaaSConnection {
        DBaaSConnection {
            metadata: ObjectMeta {
                name: Some("db-one".to_string()),
                namespace: Some("openshift-dbaas-operator".to_string()),
                ..Default::default()
            },
            spec: DBaaSConnectionSpec {
                inventory_ref: NamespacedName {
                    name: "provider-acct-test-e2e-crunchy".to_string(),
                    namespace: Some("openshift-dbaas-operator".to_string()),
                },
                instance_id: "inst-1".to_string(),
            },
            status: conditions.map(|c| DBaaSConnectionStatus {
                conditions: Some(c),
            }),
        }
    }

    #[test]
    fn test_ready_for_binding_true() {
        let connection = make_connection(Some(vec![Condition {
            condition_type: "ReadyForBinding".to_string(),
            status: "True".to_string(),
            reason: None,
            message: None,
        }]));
        assert!(connection.is_ready_for_binding());
    }

    #[test]
    fn test_ready_for_binding_absent() {
        let connection = make_connection(None);
        assert!(!connection.is_ready_for_binding());
    }

    #[test]
    fn test_spec_wire_format() {
        let connection = make_connection(None);
        let value = serde_json::to_value(&connection.spec).unwrap();
        assert_eq!(value["inventoryRef"]["name"], "provider-acct-test-e2e-crunchy");
        assert_eq!(value["instanceID"], "inst-1");
    }
}
