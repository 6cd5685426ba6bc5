//! Atomic write operations for JSONL files.
//!
//! Data is written to a sibling temporary file, flushed, then renamed over the
//! target. On POSIX filesystems the rename is atomic, so readers observe either
//! the old snapshot or the new one, never a partial file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::File;

use crate::{JsonlWriter, Result};

/// Atomically writes a slice of values to a JSONL file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, a
/// value fails to serialize, or the final rename fails. On failure the
/// original file is left unchanged and the temporary file is removed on a
/// best-effort basis.
///
/// # Examples
///
/// ```no_run
/// use roster_jsonl::write_jsonl_atomic;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rows = vec![serde_json::json!({"id": "acme-a1b2", "name": "Ada"})];
/// write_jsonl_atomic("employees.jsonl", &rows).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, values).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    tracing::debug!(path = %path.display(), records = values.len(), "Wrote JSONL snapshot");
    Ok(())
}

/// `employees.jsonl` -> `employees.jsonl.tmp`, `data` -> `data.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file<T: Serialize>(temp_path: &Path, values: &[T]) -> Result<()> {
    let file = File::create(temp_path).await?;
    let mut writer = JsonlWriter::new(file);
    writer.write_all(values).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn temp_path_appends_tmp_to_extension() {
        assert_eq!(
            make_temp_path(Path::new("/data/employees.jsonl")),
            PathBuf::from("/data/employees.jsonl.tmp")
        );
        assert_eq!(make_temp_path(Path::new("/data/raw")), PathBuf::from("/data/raw.tmp"));
    }

    #[tokio::test]
    async fn atomic_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("positions.jsonl");
        tokio::fs::write(&path, "old contents\n").await.unwrap();

        write_jsonl_atomic(&path, &[serde_json::json!({"code": "ENG-1"})])
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "{\"code\":\"ENG-1\"}\n");
        assert!(!make_temp_path(&path).exists());
    }

    #[tokio::test]
    async fn atomic_write_of_empty_slice_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("payroll.jsonl");

        write_jsonl_atomic::<serde_json::Value, _>(&path, &[])
            .await
            .unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
    }
}
