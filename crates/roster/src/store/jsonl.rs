//! JSONL snapshots for the in-memory store.

use async_trait::async_trait;
use roster_jsonl::{read_jsonl_resilient, write_jsonl_atomic, Warning as JsonlWarning};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use super::{Entity, EntityStore, InMemoryStore};
use crate::error::{Result, StoreError};

/// Non-fatal problems found while loading a snapshot. The affected line is
/// left out of the store; everything else loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A line was not valid JSON for the record type.
    MalformedJson {
        /// 1-based line number.
        line_number: usize,
        /// Parser message.
        error: String,
    },

    /// A record reused an id seen earlier in the file.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: skipped malformed record: {error}")
            }
            Self::DuplicateId { id } => write!(f, "skipped duplicate id {id}"),
        }
    }
}

/// Load a store from `path`. A missing file yields an empty store.
///
/// Records are loaded as stored, without field validation: the snapshot may
/// come from a service with looser rules, and anything dropped here would be
/// dropped from the file on the next save.
///
/// # Errors
///
/// Returns an error only if the file exists but cannot be read.
pub async fn load_from_jsonl<T: Entity>(
    path: &Path,
    prefix: &str,
) -> Result<(InMemoryStore<T>, Vec<LoadWarning>)> {
    let (parsed, jsonl_warnings) = read_jsonl_resilient::<T, _>(path).await?;

    let mut warnings: Vec<LoadWarning> = jsonl_warnings
        .into_iter()
        .map(|warning| match warning {
            JsonlWarning::MalformedJson { line_number, error } => {
                LoadWarning::MalformedJson { line_number, error }
            }
            JsonlWarning::SkippedLine {
                line_number,
                reason,
            } => LoadWarning::MalformedJson {
                line_number,
                error: reason,
            },
        })
        .collect();

    let store = InMemoryStore::<T>::new(prefix);
    {
        let mut inner = store.lock().await;
        for record in parsed {
            let id = record.id().to_string();
            if !inner.insert(record) {
                warnings.push(LoadWarning::DuplicateId { id });
            }
        }

        tracing::debug!(
            kind = %T::KIND,
            path = %path.display(),
            records = inner.records().len(),
            warnings = warnings.len(),
            "Loaded snapshot"
        );
    }

    Ok((store, warnings))
}

/// Atomically write every record of `store` to `path`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub async fn save_to_jsonl<T: Entity>(store: &InMemoryStore<T>, path: &Path) -> Result<()> {
    let inner = store.lock().await;
    write_jsonl_atomic(path, inner.records()).await?;
    Ok(())
}

/// An in-memory store that persists to a JSONL file on [`EntityStore::save`].
///
/// Lines that could not be loaded are not held in memory, so saving over a
/// snapshot that produced load warnings is refused until it is repaired.
pub struct JsonlStore<T: Entity> {
    store: InMemoryStore<T>,
    path: PathBuf,
    prefix: String,
    skipped: usize,
}

impl<T: Entity> JsonlStore<T> {
    /// Load `path` (if present) and remember it for saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub async fn open(path: PathBuf, prefix: &str) -> Result<(Self, Vec<LoadWarning>)> {
        let (store, warnings) = load_from_jsonl(&path, prefix).await?;
        Ok((
            Self {
                store,
                path,
                prefix: prefix.to_string(),
                skipped: warnings.len(),
            },
            warnings,
        ))
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for JsonlStore<T> {
    async fn list(&self) -> Result<Vec<T>> {
        self.store.list().await
    }

    async fn filter(&self, criteria: &Map<String, Value>) -> Result<Vec<T>> {
        self.store.filter(criteria).await
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>> {
        self.store.get(id).await
    }

    async fn create(&mut self, new: T::New) -> Result<T> {
        self.store.create(new).await
    }

    async fn update(&mut self, id: &T::Id, patch: Map<String, Value>) -> Result<T> {
        self.store.update(id, patch).await
    }

    async fn delete(&mut self, id: &T::Id) -> Result<()> {
        self.store.delete(id).await
    }

    async fn save(&self) -> Result<()> {
        if self.skipped > 0 {
            return Err(StoreError::DamagedSnapshot {
                path: self.path.clone(),
                skipped: self.skipped,
            }
            .into());
        }
        save_to_jsonl(&self.store, &self.path).await
    }

    async fn reload(&mut self) -> Result<Vec<LoadWarning>> {
        let (fresh, warnings) = load_from_jsonl(&self.path, &self.prefix).await?;
        self.store.replace_with(fresh).await;
        self.skipped = warnings.len();
        tracing::debug!(kind = %T::KIND, path = %self.path.display(), "Reloaded snapshot");
        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPosition, Position};
    use tempfile::TempDir;

    fn new_position(title: &str, code: &str) -> NewPosition {
        NewPosition {
            title: title.to_string(),
            code: code.to_string(),
            headcount: 1,
            ..Default::default()
        }
    }

    fn position_line(id: &str, title: &str, code: &str) -> String {
        format!(
            "{{\"id\":\"{id}\",\"title\":\"{title}\",\"code\":\"{code}\",\
             \"created_at\":\"2024-01-01T00:00:00Z\",\"updated_at\":\"2024-01-01T00:00:00Z\"}}\n"
        )
    }

    #[tokio::test]
    async fn test_save_and_reopen_preserves_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("positions.jsonl");

        let (mut store, warnings) = JsonlStore::<Position>::open(path.clone(), "acme")
            .await
            .unwrap();
        assert!(warnings.is_empty());
        store.create(new_position("Chief Executive", "CEO")).await.unwrap();
        store.create(new_position("Chief Technology", "cto")).await.unwrap();
        store.save().await.unwrap();

        let (reopened, warnings) = JsonlStore::<Position>::open(path, "acme").await.unwrap();
        assert!(warnings.is_empty());
        let codes: Vec<String> = reopened
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(codes, vec!["CEO", "CTO"]);
    }

    #[tokio::test]
    async fn test_reload_discards_unsaved_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("positions.jsonl");

        let (mut store, _) = JsonlStore::<Position>::open(path, "acme").await.unwrap();
        store.create(new_position("Chief Executive", "CEO")).await.unwrap();
        store.save().await.unwrap();
        store.create(new_position("Intern", "INT")).await.unwrap();

        store.reload().await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_keeps_records_that_fail_field_rules() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("positions.jsonl");
        let content = format!(
            "{}{}",
            position_line("acme-aaaa", "Lead", "L"),
            position_line("acme-bbbb", "  ", "B")
        );
        tokio::fs::write(&path, content).await.unwrap();

        let (store, warnings) = load_from_jsonl::<Position>(&path, "acme").await.unwrap();

        assert!(warnings.is_empty());
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_skips_malformed_and_duplicate_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("positions.jsonl");
        let content = format!(
            "{}not json\n{}",
            position_line("acme-aaaa", "Lead", "L"),
            position_line("acme-aaaa", "Again", "A")
        );
        tokio::fs::write(&path, content).await.unwrap();

        let (store, warnings) = load_from_jsonl::<Position>(&path, "acme").await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            LoadWarning::MalformedJson { line_number: 2, .. }
        ));
        assert_eq!(
            warnings[1],
            LoadWarning::DuplicateId {
                id: "acme-aaaa".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_save_refused_while_lines_were_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("positions.jsonl");
        let content = format!("{}not json\n", position_line("acme-aaaa", "Lead", "L"));
        tokio::fs::write(&path, &content).await.unwrap();

        let (mut store, warnings) = JsonlStore::<Position>::open(path.clone(), "acme")
            .await
            .unwrap();
        assert_eq!(warnings.len(), 1);
        store.create(new_position("Intern", "INT")).await.unwrap();

        let err = store.save().await.unwrap_err();
        assert!(err.to_string().contains("1 line(s)"), "got: {err}");
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), content);

        tokio::fs::write(&path, position_line("acme-aaaa", "Lead", "L"))
            .await
            .unwrap();
        assert!(store.reload().await.unwrap().is_empty());
        store.create(new_position("Intern", "INT")).await.unwrap();
        store.save().await.unwrap();
    }
}
