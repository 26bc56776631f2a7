use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashSet;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::records::{user_to_item, Item, SecondaryIndex, USER_ID};
use crate::store::RecordStore;
use crate::types::User;

/// In-memory contact table. Keeps insertion order so scans are deterministic.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
    failing_deletes: Mutex<HashSet<String>>,
    unavailable: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let items = users.into_iter().map(|user| user_to_item(&user)).collect();
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Insert a raw item, bypassing any validation
    pub async fn insert_raw(&self, item: Item) {
        self.items.lock().await.push(item);
    }

    /// Make deletes of this key fail
    pub async fn fail_delete_of(&self, user_id: &str) {
        self.failing_deletes.lock().await.insert(user_id.to_string());
    }

    /// Make every call fail
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().await = unavailable;
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    async fn check_available(&self) -> Result<(), StoreError> {
        if *self.unavailable.lock().await {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

fn key_of(item: &Item) -> Option<&str> {
    item.get(USER_ID).and_then(|v| v.as_s().ok()).map(|s| s.as_str())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_item(&self, user_id: &str) -> Result<Option<Item>, StoreError> {
        self.check_available().await?;
        let items = self.items.lock().await;
        Ok(items.iter().find(|item| key_of(item) == Some(user_id)).cloned())
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        self.check_available().await?;
        let user_id = key_of(&item)
            .ok_or_else(|| StoreError::Unavailable("item is missing its key".to_string()))?
            .to_string();

        let mut items = self.items.lock().await;
        match items.iter_mut().find(|existing| key_of(existing) == Some(user_id.as_str())) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        Ok(())
    }

    async fn delete_item(&self, user_id: &str) -> Result<(), StoreError> {
        self.check_available().await?;
        if self.failing_deletes.lock().await.contains(user_id) {
            return Err(StoreError::Unavailable(format!("delete of {} rejected", user_id)));
        }

        self.items
            .lock()
            .await
            .retain(|item| key_of(item) != Some(user_id));
        Ok(())
    }

    async fn query_index(
        &self,
        index: SecondaryIndex,
        value: &str,
    ) -> Result<Vec<Item>, StoreError> {
        self.check_available().await?;
        let wanted = AttributeValue::S(value.to_string());
        let items = self.items.lock().await;
        Ok(items
            .iter()
            .filter(|item| item.get(index.attribute()) == Some(&wanted))
            .cloned()
            .collect())
    }

    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        self.check_available().await?;
        Ok(self.items.lock().await.clone())
    }
}
