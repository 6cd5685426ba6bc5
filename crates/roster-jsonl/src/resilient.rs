//! Resilient snapshot loading.
//!
//! A damaged line must not make an entire HR snapshot unreadable, so loading
//! decodes line by line and turns per-line failures into [`Warning`]s.

use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs::File;

use crate::reader::{JsonlReader, RawLine};
use crate::warning::Warning;
use crate::Result;

/// Reads every decodable record of a JSONL file.
///
/// A missing file is treated as an empty collection. Malformed lines are
/// skipped and reported in the returned warning list, in file order.
///
/// # Errors
///
/// Returns an error only for I/O failures other than "file not found".
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Snapshot file missing, treating as empty");
            return Ok((Vec::new(), Vec::new()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = JsonlReader::new(file);
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    while let Some(line) = reader.read_raw_line().await? {
        match line {
            RawLine::InvalidUtf8 { line_number } => warnings.push(Warning::SkippedLine {
                line_number,
                reason: "invalid UTF-8".to_string(),
            }),
            RawLine::Text {
                line_number,
                content,
            } => match serde_json::from_str::<T>(&content) {
                Ok(record) => records.push(record),
                Err(e) => warnings.push(Warning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                }),
            },
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = warnings.len(),
            "Skipped damaged lines while loading snapshot"
        );
    }

    Ok((records, warnings))
}
