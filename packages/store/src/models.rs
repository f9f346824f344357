//! # Stored documents
//!
//! A [`Document`] is what a [`crate::DocumentStore`] hands back from a query: the
//! identifier generated at append time plus the JSON body exactly as it was
//! written. Bodies are opaque to the store; callers decode them into their own
//! record types with [`Document::decode`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;

/// A document stored in a named collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier generated by the store on append
    pub id: Uuid,
    /// Body as written by the caller
    pub body: Value,
}

impl Document {
    /// Read a top-level field of the body, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Decode the body into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(T::deserialize(&self.body)?)
    }
}
