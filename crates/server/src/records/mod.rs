//! Typed, collection-scoped CRUD over the document store.
//!
//! One service serves both record kinds; a [`Record`] implementation names
//! the collection and the form payload type. The service owns timestamp
//! stamping and per-operation logging; everything else is the store's
//! contract (shallow-merge updates, idempotent deletes).

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::decode_document;
use crate::store::{DocumentStore, StoreError};

/// A typed record kind stored in its own collection.
pub trait Record: DeserializeOwned + Send + 'static {
    /// Collection this record kind lives in.
    const COLLECTION: &'static str;
    /// Payload submitted by the management form (no id, no timestamps).
    type Input: Serialize + Send + Sync;
}

/// CRUD operations for typed records.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn DocumentStore>,
}

impl RecordService {
    /// Create a new record service over a document store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the full snapshot of a collection, in store order.
    ///
    /// An empty collection is `Ok(vec![])`; callers must treat that as
    /// distinct from a failure.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the snapshot cannot be produced and
    /// [`StoreError::Corrupt`] if a document cannot be decoded.
    pub async fn fetch_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let documents = self.store.list(R::COLLECTION).await.inspect_err(|error| {
            tracing::error!(collection = R::COLLECTION, %error, "failed to fetch records");
        })?;

        let mut records = Vec::with_capacity(documents.len());
        for doc in documents {
            let id = doc.id.clone();
            let record = decode_document(doc).map_err(|e| StoreError::Corrupt {
                collection: R::COLLECTION.to_owned(),
                message: format!("document {id}: {e}"),
            })?;
            records.push(record);
        }

        tracing::info!(
            collection = R::COLLECTION,
            count = records.len(),
            "records fetched"
        );
        Ok(records)
    }

    /// Add a new record: stamps `createdAt` and `updatedAt` to now, submits,
    /// and returns the stored record joined with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on store failure.
    pub async fn add<R: Record>(&self, input: &R::Input) -> Result<R, StoreError> {
        let mut data = to_fields(R::COLLECTION, input)?;
        let now = serde_json::to_value(Utc::now()).map_err(StoreError::write)?;
        data.insert("createdAt".to_owned(), now.clone());
        data.insert("updatedAt".to_owned(), now);

        let id = self
            .store
            .insert(R::COLLECTION, data.clone())
            .await
            .inspect_err(|error| {
                tracing::error!(collection = R::COLLECTION, %error, "failed to add record");
            })?;

        tracing::info!(collection = R::COLLECTION, %id, "record added");

        data.insert("id".to_owned(), Value::String(id.clone()));
        serde_json::from_value(Value::Object(data)).map_err(|e| StoreError::Corrupt {
            collection: R::COLLECTION.to_owned(),
            message: format!("document {id}: {e}"),
        })
    }

    /// Update an existing record: stamps `updatedAt` to now and merges the
    /// supplied fields; fields not included are left untouched by the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the id does not exist or the write
    /// fails.
    pub async fn update<R: Record>(&self, id: &str, input: &R::Input) -> Result<(), StoreError> {
        let patch = to_fields(R::COLLECTION, input)?;
        self.update_fields::<R>(id, patch).await
    }

    /// Merge a raw field patch into an existing record, stamping `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the id does not exist or the write
    /// fails.
    pub async fn update_fields<R: Record>(
        &self,
        id: &str,
        mut patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let now = serde_json::to_value(Utc::now()).map_err(StoreError::write)?;
        patch.insert("updatedAt".to_owned(), now);

        self.store
            .update(R::COLLECTION, id, patch)
            .await
            .inspect_err(|error| {
                tracing::error!(collection = R::COLLECTION, %id, %error, "failed to update record");
            })?;

        tracing::info!(collection = R::COLLECTION, %id, "record updated");
        Ok(())
    }

    /// Delete a record. Deleting an id that does not exist succeeds; the
    /// store does not distinguish that case and neither do we.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on store failure.
    pub async fn delete<R: Record>(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete(R::COLLECTION, id)
            .await
            .inspect_err(|error| {
                tracing::error!(collection = R::COLLECTION, %id, %error, "failed to delete record");
            })?;

        tracing::info!(collection = R::COLLECTION, %id, "record deleted");
        Ok(())
    }
}

fn to_fields<T: Serialize>(collection: &str, input: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(input).map_err(StoreError::write)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Corrupt {
            collection: collection.to_owned(),
            message: format!("payload is not a JSON object: {other}"),
        }),
    }
}
