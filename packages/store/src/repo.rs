//! # Repository: typed access to an abstract document store
//!
//! All persistence in this workspace goes through the [`DocumentStore`] trait, so
//! the submission handlers run unchanged against PostgreSQL in production and
//! against [`crate::MemoryStore`] in tests.
//!
//! ## [`DocumentStore`] trait
//!
//! An async interface with two methods:
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`append`](DocumentStore::append) | Stores a JSON body in a named collection and returns a freshly generated identifier. |
//! | [`query_eq`](DocumentStore::query_eq) | Returns every document in a collection whose top-level field equals a value, in insertion order. |
//!
//! Collections are append-only. No backend enforces uniqueness on any field:
//! callers that need "insert if absent" semantics perform a [`query_eq`](DocumentStore::query_eq)
//! followed by an [`append`](DocumentStore::append), and that sequence is not atomic.
//!
//! ## [`Repository`]
//!
//! A thin wrapper that serialises typed records into document bodies on the way
//! in, so callers never build `serde_json::Value`s by hand.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Document;

/// Async trait for appending to and querying document collections.
pub trait DocumentStore: Send + Sync {
    fn append(
        &self,
        collection: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Uuid, StoreError>> + Send;
    fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;
}

/// Typed collections backed by a DocumentStore.
#[derive(Clone, Debug)]
pub struct Repository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serialise `record` and append it to `collection`.
    pub async fn add<T: Serialize + Sync>(&self, collection: &str, record: &T) -> Result<Uuid, StoreError> {
        let body = serde_json::to_value(record)?;
        self.store.append(collection, &body).await
    }

    /// All documents in `collection` whose `field` equals `value`.
    pub async fn find_eq<V: Serialize + Sync>(
        &self,
        collection: &str,
        field: &str,
        value: &V,
    ) -> Result<Vec<Document>, StoreError> {
        let value = serde_json::to_value(value)?;
        self.store.query_eq(collection, field, &value).await
    }

    /// Whether any document in `collection` has `field` equal to `value`.
    pub async fn exists_eq<V: Serialize + Sync>(
        &self,
        collection: &str,
        field: &str,
        value: &V,
    ) -> Result<bool, StoreError> {
        Ok(!self.find_eq(collection, field, value).await?.is_empty())
    }
}
