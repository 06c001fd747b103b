//! Schemaless document store.
//!
//! The catalog treats its database as an opaque, document-oriented store:
//! named collections of independent JSON documents with store-assigned
//! string ids. [`DocumentStore`] is the seam; [`PgStore`] is the production
//! backend (one JSONB table) and [`MemoryStore`] backs unit tests.
//!
//! # Collections
//!
//! - `soils` - Soil type records
//! - `distributors` - Distributor records
//! - `users` - User profile documents (id = identity id)
//! - `identities` - Login credentials (email + password hash)

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{MIGRATOR, PgStore, create_pool};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Collection names used by the application.
pub mod collections {
    /// Soil type records.
    pub const SOILS: &str = "soils";
    /// Distributor records.
    pub const DISTRIBUTORS: &str = "distributors";
    /// User profile documents.
    pub const USERS: &str = "users";
    /// Login credentials.
    pub const IDENTITIES: &str = "identities";
}

/// Errors surfaced by a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read operation failed (network, permission, or query failure).
    #[error("store read failed: {0}")]
    Read(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A write operation failed, including updates against a missing id.
    #[error("store write failed: {0}")]
    Write(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored document could not be interpreted.
    #[error("corrupt document in {collection}: {message}")]
    Corrupt {
        /// Collection the document belongs to.
        collection: String,
        /// What went wrong.
        message: String,
    },
}

impl StoreError {
    pub(crate) fn read(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Read(Box::new(err))
    }

    pub(crate) fn write(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Write(Box::new(err))
    }

    pub(crate) fn write_msg(message: impl Into<String>) -> Self {
        Self::Write(message.into().into())
    }
}

/// A single document: its store-assigned id plus the raw field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Opaque id assigned by the store.
    pub id: String,
    /// Top-level fields of the document.
    pub data: Map<String, Value>,
}

/// A schemaless, collection-oriented document database.
///
/// Semantics every backend must honor:
///
/// - `insert` assigns the id; the caller never chooses it.
/// - `update` is a shallow merge: only the supplied top-level fields change,
///   everything else is preserved. Updating a missing id is an error.
/// - `delete` is idempotent: deleting a missing id succeeds.
/// - `list` returns the full collection in store order; no order is
///   guaranteed across calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the snapshot cannot be produced. An
    /// empty collection is `Ok(vec![])`, which callers must treat as
    /// distinct from a failure.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Fetch one document by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] on query failure.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Find the first document whose top-level string `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] on query failure.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a new document and return its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on failure.
    async fn insert(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, StoreError>;

    /// Create or fully overwrite the document at a known id.
    ///
    /// Used for documents whose id is fixed by convention (user profiles
    /// share their identity's id).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on failure.
    async fn put(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Shallow-merge `patch` into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the id does not exist or the write
    /// fails.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Delete a document. Succeeds even if the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] on failure.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Cheap connectivity probe for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the backend is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
