// SPDX-License-Identifier: Apache-2.0

//! Status conditions as reported by the DBaaS operator.

use serde::{Deserialize, Serialize};

use crate::constants::conditions::STATUS_TRUE;

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Resources whose status carries an ordered condition list.
pub trait HasConditions {
    fn conditions(&self) -> &[Condition];
}

/// True when the list contains a condition of the given type with status "True".
/// The operator gives no ordering guarantee across conditions, so the whole
/// list is searched rather than indexing position 0.
pub fn is_condition_true(conditions: &[Condition], condition_type: &str) -> bool {
    conditions
        .iter()
        .any(|c| c.condition_type == condition_type && c.status == STATUS_TRUE)
}
