//! # PostgreSQL-backed document store
//!
//! [`PgStore`] keeps every collection in a single `documents` table and stores
//! bodies as `JSONB`, so equality queries on a top-level field are a plain
//! `body -> field = value` comparison.
//!
//! ## Schema
//!
//! ```text
//! documents
//! ├── id          UUID PRIMARY KEY     (generated here, v4)
//! ├── collection  TEXT                 (indexed)
//! ├── body        JSONB
//! └── created_at  TIMESTAMPTZ          (insertion order for queries)
//! ```
//!
//! There are no unique constraints on document bodies.

use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Document;
use crate::repo::DocumentStore;

/// PostgreSQL DocumentStore.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the documents table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Document store migrations applied");
        Ok(())
    }
}

impl DocumentStore for PgStore {
    async fn append(&self, collection: &str, body: &Value) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<(Uuid, Json<Value>)> = sqlx::query_as(
            "SELECT id, body FROM documents
             WHERE collection = $1 AND body -> $2 = $3
             ORDER BY created_at, id",
        )
        .bind(collection)
        .bind(field)
        .bind(Json(value))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(body))| Document { id, body })
            .collect())
    }
}
