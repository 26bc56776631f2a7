use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoClient};

use crate::error::StoreError;
use crate::records::{key_for, Item, SecondaryIndex};

/// The contact table as the lambdas see it.
///
/// Implemented by [`DynamoStore`] in production and by
/// [`MemoryStore`](crate::memory::MemoryStore) in tests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup by primary key
    async fn get_item(&self, user_id: &str) -> Result<Option<Item>, StoreError>;

    /// Upsert by primary key
    async fn put_item(&self, item: Item) -> Result<(), StoreError>;

    /// Delete by primary key. Deleting an absent key succeeds.
    async fn delete_item(&self, user_id: &str) -> Result<(), StoreError>;

    /// Exact-match lookup through a secondary index
    async fn query_index(&self, index: SecondaryIndex, value: &str)
        -> Result<Vec<Item>, StoreError>;

    /// Full table read, first page only
    async fn scan(&self) -> Result<Vec<Item>, StoreError>;
}

pub struct DynamoStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn get_item(&self, user_id: &str) -> Result<Option<Item>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_for(user_id)))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(result.item)
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(())
    }

    async fn delete_item(&self, user_id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_for(user_id)))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(())
    }

    async fn query_index(
        &self,
        index: SecondaryIndex,
        value: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index.index_name())
            .key_condition_expression("#attr = :value")
            .expression_attribute_names("#attr", index.attribute())
            .expression_attribute_values(":value", AttributeValue::S(value.to_string()))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(result.items.unwrap_or_default())
    }

    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(result.items.unwrap_or_default())
    }
}
