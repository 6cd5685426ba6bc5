//! Ad hoc report builder over entity records.
//!
//! Records arrive as JSON objects (the shape the entity store serializes
//! to). A report is the rows that pass every active [`Predicate`], projected
//! onto the selected fields, rendered as CSV or as a padded text table.

mod csv;
mod filter;
mod text;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

pub use csv::to_csv;
pub use filter::{Operator, Predicate, PredicateParseError};
pub use text::{render_text, TextOptions};

/// One source record.
pub type Record = Map<String, Value>;

/// The projected rows of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    /// Column names, in output order.
    pub fields: Vec<String>,
    /// One rendered value per field, per passing record.
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no record passed the filters.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filter `records` and project the survivors onto `fields`.
///
/// With no `fields`, every key of the first source record is used (even when
/// no record passes, so the header is stable).
pub fn build_report(
    records: &[Record],
    predicates: &[Predicate],
    fields: &[String],
) -> ReportTable {
    let fields: Vec<String> = if fields.is_empty() {
        records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        fields.to_vec()
    };

    let rows = records
        .iter()
        .filter(|record| predicates.iter().all(|p| p.matches(record)))
        .map(|record| {
            fields
                .iter()
                .map(|field| render_value(record.get(field)))
                .collect()
        })
        .collect();

    ReportTable { fields, rows }
}

/// Serialize typed records into report input.
///
/// # Errors
///
/// Returns a JSON error if a record does not serialize to an object.
pub fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<Record>> {
    items
        .iter()
        .map(|item| match serde_json::to_value(item)? {
            Value::Object(map) => Ok(map),
            other => Ok(Map::from_iter([("value".to_string(), other)])),
        })
        .collect()
}

/// Text form of a field value: missing and null are empty, strings verbatim,
/// everything else as compact JSON.
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
