use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::table::{Attributes, InMemoryTable, Item, KeyValueTable, TableError, TableKey};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TableCall {
    Get(TableKey),
    Put(Item),
    Update(TableKey, Attributes),
    Delete(TableKey),
    Query { pk: String, sk_prefix: String },
}

/// In-memory table that records every call and can be switched to fail.
pub struct TestTable {
    inner: InMemoryTable,
    calls: Mutex<Vec<TableCall>>,
    failing: AtomicBool,
}

impl TestTable {
    pub fn new() -> Self {
        TestTable {
            inner: InMemoryTable::new(),
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let table = Self::new();
        table.failing.store(true, Ordering::Relaxed);
        table
    }

    pub async fn seed(&self, item: Item) {
        self.inner.put_item(item).await.expect("seeding failed");
    }

    pub async fn calls(&self) -> Vec<TableCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: TableCall) -> Result<(), TableError> {
        self.calls.lock().await.push(call);
        if self.failing.load(Ordering::Relaxed) {
            Err(TableError::Backend(Box::new(io::Error::from(io::ErrorKind::ConnectionReset))))
        } else {
            Ok(())
        }
    }
}

// the store owns its table, tests keep a second handle to look at the calls
#[async_trait]
impl KeyValueTable for Arc<TestTable> {
    async fn get_item(
        &self,
        key: &TableKey,
    ) -> Result<Option<Item>, TableError> {
        self.record(TableCall::Get(key.clone())).await?;
        self.inner.get_item(key).await
    }

    async fn put_item(&self, item: Item) -> Result<(), TableError> {
        self.record(TableCall::Put(item.clone())).await?;
        self.inner.put_item(item).await
    }

    async fn update_item(
        &self,
        key: &TableKey,
        attributes: Attributes,
    ) -> Result<Item, TableError> {
        self.record(TableCall::Update(key.clone(), attributes.clone())).await?;
        self.inner.update_item(key, attributes).await
    }

    async fn delete_item(&self, key: &TableKey) -> Result<(), TableError> {
        self.record(TableCall::Delete(key.clone())).await?;
        self.inner.delete_item(key).await
    }

    async fn query(
        &self,
        pk: &str,
        sk_prefix: &str,
    ) -> Result<Vec<Item>, TableError> {
        self.record(
            TableCall::Query {
                pk: pk.to_owned(),
                sk_prefix: sk_prefix.to_owned(),
            }
        ).await?;
        self.inner.query(pk, sk_prefix).await
    }
}
