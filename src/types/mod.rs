// SPDX-License-Identifier: Apache-2.0

//! Resource model for the DBaaS operator's custom resources.

pub mod condition;
pub mod connection;
pub mod inventory;

pub use condition::{is_condition_true, Condition, HasConditions};
pub use connection::{DBaaSConnection, DBaaSConnectionSpec, DBaaSConnectionStatus};
pub use inventory::{
    DBaaSInventory, DBaaSInventorySpec, DBaaSInventoryStatus, DatabaseInstance, NamespacedName,
};
