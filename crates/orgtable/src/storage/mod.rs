//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`orgtable_core::storage::ItemStore`] trait plus the [`KeyedItemStore`]
//! access layer built on top of it. The backend is selected at compile time
//! via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local store, nothing is persisted
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p orgtable --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p orgtable --features inmemory"
);

// The in-memory store backs the test suite regardless of the selected backend.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

mod keyed;

#[cfg(test)]
pub mod testing;

pub use keyed::{KeyedItemStore, WriteSummary};

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryItemStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbItemStore;
