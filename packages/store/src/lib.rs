//! Append-only document collections behind an async trait.

pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "postgres")]
mod pg;
#[cfg(feature = "postgres")]
pub use pg::PgStore;

pub use error::StoreError;
pub use models::Document;
pub use repo::{DocumentStore, Repository};
