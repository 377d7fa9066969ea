//! In-memory item store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use orgtable_core::storage::{ItemStore, Record, RecordKey, Result};

/// In-memory storage backend for testing and local runs.
///
/// Records live in a `BTreeMap` keyed by `(PK, SK)`, so a prefix scan is a
/// range walk and yields records in sort-key order. Data is not persisted and
/// will be lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemStore {
    records: Arc<RwLock<BTreeMap<RecordKey, Record>>>,
}

impl InMemoryItemStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all partitions.
    #[cfg(test)]
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn put(&self, record: Record) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.key(), record);
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn query(&self, pk: &str, sk_prefix: &str) -> Result<Vec<Record>> {
        let records = self.records.read().await;
        let start = RecordKey::new(pk, sk_prefix);
        Ok(records
            .range(start..)
            .take_while(|(key, _)| key.pk == pk && key.sk.starts_with(sk_prefix))
            .map(|(_, record)| record.clone())
            .collect())
    }
}
