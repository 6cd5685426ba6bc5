//! Ephemeral store backed by a `Vec` in insertion order plus an id index.
//!
//! The inner state lives behind `Arc<tokio::sync::Mutex<_>>`, so clones of a
//! store share data and every operation takes the lock once.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::{Entity, EntityStore, LoadWarning};
use crate::error::{Result, StoreError};
use crate::id_generation::IdGenerator;

/// Fields a patch may never touch.
const IMMUTABLE_FIELDS: [&str; 2] = ["id", "created_at"];

pub(super) struct Inner<T: Entity> {
    records: Vec<T>,
    /// id -> position in `records`
    index: HashMap<String, usize>,
    id_generator: IdGenerator,
}

impl<T: Entity> Inner<T> {
    fn new(prefix: &str) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            id_generator: IdGenerator::new(prefix, T::KIND),
        }
    }

    /// Insert an already-identified record. Returns `false` if the id is taken.
    pub(super) fn insert(&mut self, record: T) -> bool {
        let id = record.id().as_ref().to_string();
        if self.index.contains_key(&id) {
            return false;
        }
        self.id_generator.register_id(id.clone());
        self.index.insert(id, self.records.len());
        self.records.push(record);
        true
    }

    pub(super) fn records(&self) -> &[T] {
        &self.records
    }

    fn position(&self, id: &T::Id) -> Result<usize> {
        self.index.get(id.as_ref()).copied().ok_or_else(|| {
            StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            }
            .into()
        })
    }

    fn remove(&mut self, id: &T::Id) -> Result<()> {
        let position = self.position(id)?;
        self.records.remove(position);
        self.id_generator.forget_id(id.as_ref());
        self.reindex();
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id().as_ref().to_string(), i))
            .collect();
    }
}

/// Thread-safe in-memory entity store.
pub struct InMemoryStore<T: Entity> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T: Entity> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> InMemoryStore<T> {
    /// An empty store generating ids with `prefix`.
    pub fn new(prefix: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::new(prefix))),
        }
    }

    pub(super) async fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().await
    }

    /// Swap in freshly loaded state.
    pub(super) async fn replace_with(&self, other: InMemoryStore<T>) {
        let mut fresh = other.inner.lock().await;
        let mut inner = self.inner.lock().await;
        std::mem::swap(&mut *inner, &mut *fresh);
    }
}

/// Apply a field patch to a record through its serialized form.
fn apply_patch<T: Entity>(record: &T, patch: Map<String, Value>) -> Result<T> {
    let Value::Object(mut fields) = serde_json::to_value(record)? else {
        return Err(StoreError::InvalidPatch(format!("{} is not a JSON object", T::KIND)).into());
    };

    for (key, value) in patch {
        if IMMUTABLE_FIELDS.contains(&key.as_str()) {
            return Err(StoreError::InvalidPatch(format!("'{key}' cannot be changed")).into());
        }
        if !fields.contains_key(&key) {
            return Err(StoreError::InvalidPatch(format!("unknown field '{key}'")).into());
        }
        fields.insert(key, value);
    }

    let mut updated: T = serde_json::from_value(Value::Object(fields))
        .map_err(|e| StoreError::InvalidPatch(e.to_string()))?;
    updated.check()?;
    updated.touch(Utc::now());
    Ok(updated)
}

fn matches_criteria<T: Entity>(record: &T, criteria: &Map<String, Value>) -> Result<bool> {
    if criteria.is_empty() {
        return Ok(true);
    }
    let Value::Object(fields) = serde_json::to_value(record)? else {
        return Ok(false);
    };
    Ok(criteria
        .iter()
        .all(|(key, expected)| fields.get(key) == Some(expected)))
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.lock().await.records.clone())
    }

    async fn filter(&self, criteria: &Map<String, Value>) -> Result<Vec<T>> {
        let inner = self.lock().await;
        let mut matched = Vec::new();
        for record in &inner.records {
            if matches_criteria(record, criteria)? {
                matched.push(record.clone());
            }
        }
        Ok(matched)
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>> {
        let inner = self.lock().await;
        Ok(inner
            .index
            .get(id.as_ref())
            .map(|&i| inner.records[i].clone()))
    }

    async fn create(&mut self, new: T::New) -> Result<T> {
        T::validate_new(&new)?;

        let mut inner = self.lock().await;
        let id = inner
            .id_generator
            .generate(&T::id_seed(&new))
            .map_err(|e| StoreError::IdGeneration(e.to_string()))?;

        let record = T::from_new(T::Id::from(id), new, Utc::now());
        inner.insert(record.clone());

        tracing::debug!(kind = %T::KIND, id = %record.id(), "Created record");
        Ok(record)
    }

    async fn update(&mut self, id: &T::Id, patch: Map<String, Value>) -> Result<T> {
        let mut inner = self.lock().await;
        let position = inner.position(id)?;

        let updated = apply_patch(&inner.records[position], patch)?;
        inner.records[position] = updated.clone();

        tracing::debug!(kind = %T::KIND, id = %id, "Updated record");
        Ok(updated)
    }

    async fn delete(&mut self, id: &T::Id) -> Result<()> {
        self.lock().await.remove(id)?;
        tracing::debug!(kind = %T::KIND, id = %id, "Deleted record");
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        Ok(())
    }

    async fn reload(&mut self) -> Result<Vec<LoadWarning>> {
        Ok(Vec::new())
    }
}
