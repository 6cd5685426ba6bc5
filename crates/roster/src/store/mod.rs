//! Entity store abstraction.
//!
//! The data service is modeled as one [`EntityStore`] per collection
//! (employees, positions, payroll). Records are returned in insertion order;
//! the hierarchy builder relies on that order for sibling ordering.
//!
//! Two backends exist:
//!
//! - **In-memory**: ephemeral, used by tests and `--backend memory`
//! - **JSONL**: the in-memory store loaded from and saved to
//!   `<data-dir>/<collection>.jsonl` with atomic writes
//!
//! # Updates
//!
//! [`EntityStore::update`] takes a field patch (`serde_json::Map`) and merges
//! it into the serialized record. Keys that are not fields of the record,
//! `id` and `created_at` are rejected with [`StoreError::InvalidPatch`].
//!
//! [`StoreError::InvalidPatch`]: crate::error::StoreError::InvalidPatch

mod entity;
mod in_memory;
mod jsonl;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use entity::Entity;
pub use in_memory::InMemoryStore;
pub use jsonl::{load_from_jsonl, save_to_jsonl, JsonlStore, LoadWarning};

/// CRUD access to one entity collection.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<T>>;

    /// Records whose serialized fields equal every value in `criteria`.
    ///
    /// An empty map matches everything.
    async fn filter(&self, criteria: &Map<String, Value>) -> Result<Vec<T>>;

    /// A record by id, or `None`.
    async fn get(&self, id: &T::Id) -> Result<Option<T>>;

    /// Validate, assign an id and insert.
    ///
    /// # Errors
    ///
    /// `Error::Validation` if the payload is invalid.
    async fn create(&mut self, new: T::New) -> Result<T>;

    /// Merge `patch` into the record and return the stored result.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the record does not exist
    /// - `StoreError::InvalidPatch` for unknown or immutable keys, or values
    ///   of the wrong type
    /// - `Error::Validation` if the patched record is invalid
    async fn update(&mut self, id: &T::Id, patch: Map<String, Value>) -> Result<T>;

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the record does not exist.
    async fn delete(&mut self, id: &T::Id) -> Result<()>;

    /// Persist the collection. A no-op for in-memory stores.
    async fn save(&self) -> Result<()>;

    /// Discard in-memory state and re-read the snapshot. A no-op for
    /// in-memory stores.
    async fn reload(&mut self) -> Result<Vec<LoadWarning>>;
}

/// Which store implementation to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Ephemeral in-memory store.
    InMemory,
    /// JSONL snapshots under the given data directory.
    Jsonl(PathBuf),
}

impl StorageBackend {
    /// Data directory for file-backed stores.
    pub fn data_dir(&self) -> Option<&Path> {
        match self {
            Self::Jsonl(dir) => Some(dir),
            Self::InMemory => None,
        }
    }
}

/// Open the `T` collection on `backend`, returning any load warnings.
///
/// # Errors
///
/// Returns an error if the snapshot exists but cannot be read.
pub async fn open_store<T: Entity>(
    backend: &StorageBackend,
    prefix: &str,
) -> Result<(Box<dyn EntityStore<T>>, Vec<LoadWarning>)> {
    match backend {
        StorageBackend::InMemory => Ok((Box::new(InMemoryStore::<T>::new(prefix)), Vec::new())),
        StorageBackend::Jsonl(dir) => {
            let path = dir.join(T::KIND.file_name());
            let (store, warnings) = JsonlStore::<T>::open(path, prefix).await?;
            Ok((Box::new(store), warnings))
        }
    }
}
