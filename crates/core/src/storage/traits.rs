use async_trait::async_trait;

use super::keys::RecordKey;
use super::types::Record;
use super::Result;

/// Boundary with the underlying key-value/wide-column store.
///
/// Implementations never retry. A query may span several pages of the
/// underlying store but returns only once every page is read. Absence
/// is not an error: `get` returns `None` and `query` an empty vector.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Upserts a record at its exact key, replacing any previous item.
    async fn put(&self, record: Record) -> Result<()>;

    /// Gets the record stored at an exact key.
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>>;

    /// Gets every record in partition `pk` whose sort key begins with `sk_prefix`.
    ///
    /// Results come in whatever order the store yields them.
    async fn query(&self, pk: &str, sk_prefix: &str) -> Result<Vec<Record>>;
}
