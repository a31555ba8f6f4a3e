//! The key-value table notes live in.
//!
//! A table holds string-attribute items addressed by a `(pk, sk)` pair.
//! Items of one partition can be queried together, in ascending sort key
//! order. Every operation is a single atomic round trip.

mod errors;
mod memory;
#[cfg(feature = "dynamodb")] mod dynamodb;

use std::collections::BTreeMap;
use async_trait::async_trait;
use log::info;

pub use errors::{TableError, TableSetupError};
pub use memory::InMemoryTable;
#[cfg(feature = "dynamodb")] pub use dynamodb::DynamoDbTable;

use crate::config::app_config::{TableBackend, TableConfig};

pub type Attributes = BTreeMap<String, String>;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TableKey {
    pub pk: String,
    pub sk: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub key: TableKey,
    pub attributes: Attributes,
}

#[async_trait]
pub trait KeyValueTable: Send + Sync {
    async fn get_item(
        &self,
        key: &TableKey,
    ) -> Result<Option<Item>, TableError>;

    /// Writes the item, replacing whatever was stored under its key.
    async fn put_item(&self, item: Item) -> Result<(), TableError>;

    /// Sets `attributes` on an existing item and returns the item as it is
    /// after the update.
    ///
    /// Fails with [`TableError::ConditionalCheckFailed`] if there is no
    /// item under `key`.
    async fn update_item(
        &self,
        key: &TableKey,
        attributes: Attributes,
    ) -> Result<Item, TableError>;

    /// Removes the item if it exists.
    async fn delete_item(&self, key: &TableKey) -> Result<(), TableError>;

    async fn query(
        &self,
        pk: &str,
        sk_prefix: &str,
    ) -> Result<Vec<Item>, TableError>;
}

pub async fn table_from_config(
    config: &TableConfig,
) -> Result<Box<dyn KeyValueTable>, TableSetupError> {
    match config.backend {
        TableBackend::Memory => {
            info!("using an in-memory table, notes will not survive a restart");
            Ok(Box::new(InMemoryTable::new()))
        },

        #[cfg(feature = "dynamodb")]
        TableBackend::DynamoDb => Ok(
            Box::new(
                DynamoDbTable::new(
                    &config.name,
                    config.endpoint_url.as_deref(),
                ).await
            )
        ),

        #[cfg(not(feature = "dynamodb"))]
        TableBackend::DynamoDb => Err(TableSetupError::BackendNotCompiled("dynamodb")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_config(backend: TableBackend) -> TableConfig {
        TableConfig {
            backend,
            ..TableConfig::default()
        }
    }

    #[tokio::test]
    async fn memory_backend_is_always_available() {
        let table = table_from_config(&table_config(TableBackend::Memory))
            .await
            .unwrap_or_else(|e| panic!("setup failed: {e}"));
        assert!(table.query("u1", "note#").await.unwrap().is_empty());
    }

    #[cfg(not(feature = "dynamodb"))]
    #[tokio::test]
    async fn dynamodb_backend_needs_its_feature() {
        match table_from_config(&table_config(TableBackend::DynamoDb)).await {
            Err(TableSetupError::BackendNotCompiled(name)) => assert_eq!(name, "dynamodb"),
            Ok(_) => panic!("got a table without the dynamodb feature"),
        }
    }
}
