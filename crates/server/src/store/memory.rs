//! In-memory document store.
//!
//! Backs unit tests with the same contract as [`PgStore`]: shallow-merge
//! updates, idempotent deletes, store-assigned ids in insertion order.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError};

/// Document store held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    // Vec per collection to keep a stable snapshot order.
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Whether a collection currently has no documents.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned()))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.read().await.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| doc.data.get(field).and_then(Value::as_str) == Some(value))
                .cloned()
        }))
    }

    async fn insert(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(Document {
                id: id.clone(),
                data,
            });
        Ok(id)
    }

    async fn put(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();
        if let Some(doc) = docs.iter_mut().find(|doc| doc.id == id) {
            doc.data = data;
        } else {
            docs.push(Document {
                id: id.to_owned(),
                data,
            });
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::write_msg(format!("no document {id} in {collection}")))?;

        for (key, value) in patch {
            doc.data.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
