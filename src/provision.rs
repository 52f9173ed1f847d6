// SPDX-License-Identifier: Apache-2.0

//! Per-provider resource provisioning and teardown.
//!
//! Creates are never retried; readiness is the poller's job. The credential
//! secret is submitted before the inventory that references it, but the API
//! server may accept the inventory before the secret is reconciled.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use kube::api::{DeleteParams, ObjectMeta, PostParams};
use kube::{Api, Client};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::constants::{labels, names::INVENTORY_PREFIX};
use crate::credentials::ProviderAccount;
use crate::error::{Error, Result};
use crate::types::{
    DBaaSConnection, DBaaSConnectionSpec, DBaaSInventory, DBaaSInventorySpec, DatabaseInstance,
    NamespacedName,
};

/// Name of the inventory created for a provider
pub fn inventory_name(provider_name: &str) -> String {
    format!("{}{}", INVENTORY_PREFIX, provider_name)
}

/// Build the credential secret for a provider account
pub fn credentials_secret(account: &ProviderAccount, namespace: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(account.secret_name.clone()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(account.secret_data.clone()),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

/// Build the inventory referencing a provider's credential secret.
///
/// Fails when the account carries no `providerType` field, since the operator
/// cannot dispatch an inventory without the discriminator.
pub fn inventory_for(account: &ProviderAccount, namespace: &str) -> Result<DBaaSInventory> {
    let provider_type = account.provider_type().ok_or_else(|| Error::MissingSecretField {
        namespace: namespace.to_string(),
        name: account.secret_name.clone(),
        field: crate::constants::PROVIDER_TYPE_FIELD.to_string(),
    })?;

    let mut inventory = DBaaSInventory::new(
        &inventory_name(&account.provider_name),
        DBaaSInventorySpec {
            provider_ref: NamespacedName {
                name: provider_type,
                namespace: Some(namespace.to_string()),
            },
            credentials_ref: NamespacedName {
                name: account.secret_name.clone(),
                namespace: Some(namespace.to_string()),
            },
        },
    );
    inventory.metadata.namespace = Some(namespace.to_string());
    inventory.metadata.labels = Some(BTreeMap::from([
        (
            labels::RELATED_TO_KEY.to_string(),
            labels::RELATED_TO_VALUE.to_string(),
        ),
        (labels::TYPE_KEY.to_string(), labels::TYPE_VALUE.to_string()),
    ]));
    Ok(inventory)
}

/// Build the connection binding an inventory-discovered instance
pub fn connection_for(
    inventory_name: &str,
    instance: &DatabaseInstance,
    namespace: &str,
) -> DBaaSConnection {
    let mut connection = DBaaSConnection::new(
        &instance.name,
        DBaaSConnectionSpec {
            inventory_ref: NamespacedName {
                name: inventory_name.to_string(),
                namespace: Some(namespace.to_string()),
            },
            instance_id: instance.instance_id.clone(),
        },
    );
    connection.metadata.namespace = Some(namespace.to_string());
    connection
}

/// Create the credential secret followed by the inventory for one provider
#[instrument(skip(client, account), fields(provider = %account.provider_name))]
pub async fn create_provider_resources(
    client: &Client,
    account: &ProviderAccount,
    namespace: &str,
) -> Result<()> {
    let secret = credentials_secret(account, namespace);
    log_yaml("secret", &secret);
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    secrets.create(&PostParams::default(), &secret).await?;
    info!("Created credential secret {}/{}", namespace, account.secret_name);

    let inventory = inventory_for(account, namespace)?;
    log_yaml("inventory", &inventory);
    let inventories: Api<DBaaSInventory> = Api::namespaced(client.clone(), namespace);
    inventories.create(&PostParams::default(), &inventory).await?;
    info!(
        "Created inventory {}/{}",
        namespace,
        inventory_name(&account.provider_name)
    );

    Ok(())
}

/// Create the connection for an instance discovered by an inventory
#[instrument(skip(client, instance), fields(instance = %instance.name))]
pub async fn create_connection(
    client: &Client,
    inventory_name: &str,
    instance: &DatabaseInstance,
    namespace: &str,
) -> Result<()> {
    let connection = connection_for(inventory_name, instance, namespace);
    log_yaml("connection", &connection);
    let connections: Api<DBaaSConnection> = Api::namespaced(client.clone(), namespace);
    connections
        .create(&PostParams::default(), &connection)
        .await?;
    info!("Created connection {}/{}", namespace, instance.name);
    Ok(())
}

/// Delete everything provisioned for one provider, in reverse creation order:
/// connections, then the inventory, then the credential secret. Missing
/// objects are tolerated so teardown is safe after partial provisioning.
#[instrument(skip(client, account, connection_names), fields(provider = %account.provider_name))]
pub async fn teardown_provider_resources(
    client: &Client,
    account: &ProviderAccount,
    connection_names: &[String],
    namespace: &str,
) -> Result<()> {
    let connections: Api<DBaaSConnection> = Api::namespaced(client.clone(), namespace);
    for name in connection_names {
        delete_ignoring_missing(&connections, name).await?;
    }

    let inventories: Api<DBaaSInventory> = Api::namespaced(client.clone(), namespace);
    delete_ignoring_missing(&inventories, &inventory_name(&account.provider_name)).await?;

    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    delete_ignoring_missing(&secrets, &account.secret_name).await?;

    info!("Teardown complete for provider {}", account.provider_name);
    Ok(())
}

async fn delete_ignoring_missing<K>(api: &Api<K>, name: &str) -> Result<()>
where
    K: kube::Resource + Clone + serde::de::DeserializeOwned + std::fmt::Debug,
{
    match api.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            debug!("Deleted {}", name);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("{} already gone", name);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Dump a created object as YAML at debug level
fn log_yaml<T: Serialize>(kind: &str, object: &T) {
    match serde_yaml::to_string(object) {
        Ok(yaml) => debug!("{} manifest:\n{}", kind, yaml),
        Err(e) => warn!("Failed to render {} as YAML: {}", kind, e),
    }
}
