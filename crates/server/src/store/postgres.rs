//! Postgres-backed document store.
//!
//! All collections share one `documents` table with a JSONB payload column.
//! Partial updates use the JSONB `||` merge operator so untouched fields are
//! preserved by the database itself.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError};

/// Embedded migrations for the documents table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Document store over a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool (shared with the session store).
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_document(collection: &str, id: String, data: Value) -> Result<Document, StoreError> {
    match data {
        Value::Object(map) => Ok(Document { id, data: map }),
        other => Err(StoreError::Corrupt {
            collection: collection.to_owned(),
            message: format!("document {id} is not a JSON object: {other}"),
        }),
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::read)?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id").map_err(StoreError::read)?;
            let data: Value = row.try_get("data").map_err(StoreError::read)?;
            documents.push(row_to_document(collection, id, data)?);
        }

        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::read)?;

        match row {
            Some(row) => {
                let data: Value = row.try_get("data").map_err(StoreError::read)?;
                Ok(Some(row_to_document(collection, id.to_owned(), data)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            "SELECT id, data FROM documents WHERE collection = $1 AND data ->> $2 = $3 LIMIT 1",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::read)?;

        match row {
            Some(row) => {
                let id: String = row.try_get("id").map_err(StoreError::read)?;
                let data: Value = row.try_get("data").map_err(StoreError::read)?;
                Ok(Some(row_to_document(collection, id, data)?))
            }
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Value::Object(data))
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;

        Ok(id)
    }

    async fn put(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(data))
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(patch))
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::write_msg(format!(
                "no document {id} in {collection}"
            )));
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        // Deleting a missing id is a success, matching the store contract.
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::read)?;
        Ok(())
    }
}
