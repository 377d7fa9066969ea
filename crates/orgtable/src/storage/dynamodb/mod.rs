//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the
//! [`orgtable_core::storage::ItemStore`] trait using `aws-sdk-dynamodb`.
//! The table needs a string partition key `PK` and a string sort key `SK`.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbItemStore;
