//! DynamoDB item store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use orgtable_core::storage::keys::{PK_ATTR, SK_ATTR};
use orgtable_core::storage::{ItemStore, Record, RecordKey, Result};

use super::conversions::{item_to_record, record_to_item};
use super::error::map_sdk_error;

/// DynamoDB-based item store.
///
/// The client is constructed by the caller and injected; this type owns no
/// process-wide state.
pub struct DynamoDbItemStore {
    client: Client,
    table_name: String,
}

impl DynamoDbItemStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store using the AWS SDK default credential chain.
    ///
    /// Honors `AWS_ENDPOINT_URL` and `AWS_REGION` through the SDK's own
    /// environment handling.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemStore for DynamoDbItemStore {
    async fn put(&self, record: Record) -> Result<()> {
        let item = record_to_item(&record);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutItem"))?;

        tracing::debug!(pk = %record.pk, sk = %record.sk, "PutItem");
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PK_ATTR, AttributeValue::S(key.pk.clone()))
            .key(SK_ATTR, AttributeValue::S(key.sk.clone()))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "GetItem"))?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn query(&self, pk: &str, sk_prefix: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("PK = :pk AND begins_with(SK, :sk)")
                .expression_attribute_values(":pk", AttributeValue::S(pk.to_string()))
                .expression_attribute_values(":sk", AttributeValue::S(sk_prefix.to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| map_sdk_error(e, "Query"))?;

            for item in result.items() {
                records.push(item_to_record(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(pk, sk_prefix, count = records.len(), "Query");
        Ok(records)
    }
}
