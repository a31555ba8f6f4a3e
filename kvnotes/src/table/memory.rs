use std::collections::BTreeMap;
use async_trait::async_trait;
use log::trace;
use tokio::sync::RwLock;

use crate::table::{Attributes, Item, KeyValueTable, TableError, TableKey};

/// Table kept in process memory, partitions map sort keys to attributes.
#[derive(Debug, Default)]
pub struct InMemoryTable {
    partitions: RwLock<BTreeMap<String, BTreeMap<String, Attributes>>>,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

fn make_item(pk: &str, sk: &str, attributes: &Attributes) -> Item {
    Item {
        key: TableKey {
            pk: pk.to_owned(),
            sk: sk.to_owned(),
        },
        attributes: attributes.clone(),
    }
}

#[async_trait]
impl KeyValueTable for InMemoryTable {
    async fn get_item(
        &self,
        key: &TableKey,
    ) -> Result<Option<Item>, TableError> {
        Ok(
            self.partitions
                .read()
                .await
                .get(&key.pk)
                .and_then(|partition| partition.get(&key.sk))
                .map(|attributes| make_item(&key.pk, &key.sk, attributes))
        )
    }

    async fn put_item(&self, item: Item) -> Result<(), TableError> {
        trace!("putting item {:?}", item.key);
        self.partitions
            .write()
            .await
            .entry(item.key.pk)
            .or_default()
            .insert(item.key.sk, item.attributes);
        Ok(())
    }

    async fn update_item(
        &self,
        key: &TableKey,
        attributes: Attributes,
    ) -> Result<Item, TableError> {
        trace!("updating item {key:?}");
        let mut partitions = self.partitions.write().await;
        let stored = partitions
            .get_mut(&key.pk)
            .and_then(|partition| partition.get_mut(&key.sk))
            .ok_or(TableError::ConditionalCheckFailed)?;
        stored.extend(attributes);
        Ok(make_item(&key.pk, &key.sk, stored))
    }

    async fn delete_item(&self, key: &TableKey) -> Result<(), TableError> {
        trace!("deleting item {key:?}");
        let mut partitions = self.partitions.write().await;
        if let Some(partition) = partitions.get_mut(&key.pk) {
            partition.remove(&key.sk);
            if partition.is_empty() {
                partitions.remove(&key.pk);
            }
        }
        Ok(())
    }

    async fn query(
        &self,
        pk: &str,
        sk_prefix: &str,
    ) -> Result<Vec<Item>, TableError> {
        Ok(
            self.partitions
                .read()
                .await
                .get(pk)
                .map(|partition| {
                    partition
                        .range(sk_prefix.to_owned()..)
                        .take_while(|(sk, _)| sk.starts_with(sk_prefix))
                        .map(|(sk, attributes)| make_item(pk, sk, attributes))
                        .collect()
                })
                .unwrap_or_default()
        )
    }
}
