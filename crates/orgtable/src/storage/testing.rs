//! Test doubles for the store boundary.

use async_trait::async_trait;

use orgtable_core::storage::{
    FailureKind, ItemStore, Record, RecordKey, Result, StoreError, StoreFailure,
};

/// A store whose every call fails with the same cause.
pub struct FailingStore {
    kind: FailureKind,
}

impl FailingStore {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }

    pub fn failure(&self) -> StoreError {
        StoreError::Unavailable(StoreFailure::new(self.kind, "simulated store failure"))
    }
}

#[async_trait]
impl ItemStore for FailingStore {
    async fn put(&self, _record: Record) -> Result<()> {
        Err(self.failure())
    }

    async fn get(&self, _key: &RecordKey) -> Result<Option<Record>> {
        Err(self.failure())
    }

    async fn query(&self, _pk: &str, _sk_prefix: &str) -> Result<Vec<Record>> {
        Err(self.failure())
    }
}
