//! Application state.
//!
//! Shared by every request handler. The store client is built once at startup
//! and injected here; handlers never reach for a global handle.

use std::sync::Arc;

use orgtable_core::storage::ItemStore;

use crate::config::Config;
use crate::storage::KeyedItemStore;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Single-table access layer over the configured backend.
    pub store: KeyedItemStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state over an already constructed backend.
    pub fn new(backend: Arc<dyn ItemStore>, config: Config) -> Self {
        let store = KeyedItemStore::new(backend).with_ingest_concurrency(config.ingest_concurrency);
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Creates state over the backend selected at compile time.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: Config) -> Self {
        tracing::info!("Using in-memory storage backend");
        Self::new(Arc::new(crate::storage::InMemoryItemStore::new()), config)
    }

    /// Creates state over the backend selected at compile time.
    #[cfg(feature = "dynamodb")]
    pub async fn from_config(config: Config) -> Self {
        let backend = crate::storage::DynamoDbItemStore::from_env(config.table_name.clone()).await;
        tracing::info!(table = %backend.table_name(), "Using DynamoDB storage backend");
        Self::new(Arc::new(backend), config)
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(crate::storage::inmemory::InMemoryItemStore::new()),
            Config {
                table_name: "orgtable".to_string(),
                ingest_concurrency: 1,
                report_department: "Engineering".to_string(),
            },
        )
    }
}
