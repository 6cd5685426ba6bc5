//! Fixed-width text table rendering.

use chrono::{DateTime, Utc};

use super::ReportTable;
use crate::config::DEFAULT_MAX_COLUMN_WIDTH;

const ELLIPSIS: &str = "...";
const COLUMN_GAP: &str = "  ";
/// Narrowest cap that still leaves room for a character before the ellipsis.
const MIN_COLUMN_WIDTH: usize = ELLIPSIS.len() + 1;

/// Presentation options for [`render_text`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Heading line.
    pub title: String,
    /// Timestamp printed under the title.
    pub generated_at: DateTime<Utc>,
    /// Column width cap; longer values are truncated with `...`.
    pub max_column_width: usize,
}

impl TextOptions {
    /// Options with the default width cap, stamped now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
        }
    }
}

/// Render `table` as a bannered, column-aligned text report.
pub fn render_text(table: &ReportTable, options: &TextOptions) -> String {
    let cap = options.max_column_width.max(MIN_COLUMN_WIDTH);
    let widths: Vec<usize> = table
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(field.chars().count()))
                .max()
                .unwrap_or(0)
                .min(cap)
        })
        .collect();

    let table_width =
        widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    let banner_width = table_width.max(options.title.chars().count()).max(40);
    let heavy = "═".repeat(banner_width);
    let light = "─".repeat(banner_width);

    let mut lines = vec![
        heavy.clone(),
        options.title.clone(),
        format!("Generated: {}", options.generated_at.format("%Y-%m-%d %H:%M UTC")),
        format!("Records: {}", table.rows.len()),
        heavy.clone(),
        format_row(&table.fields, &widths),
        light,
    ];
    lines.extend(table.rows.iter().map(|row| format_row(row, &widths)));
    lines.push(heavy);

    lines.join("\n")
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let value = values.get(i).map_or("", String::as_str);
            format!("{:<width$}", truncate(value, width))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(ELLIPSIS.len())).collect();
    format!("{kept}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn options(max_column_width: usize) -> TextOptions {
        TextOptions {
            title: "Headcount".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            max_column_width,
        }
    }

    fn table() -> ReportTable {
        ReportTable {
            fields: vec!["name".to_string(), "title".to_string()],
            rows: vec![
                vec!["Ada".to_string(), "Principal Engineer".to_string()],
                vec!["Grace".to_string(), "Rear Admiral".to_string()],
            ],
        }
    }

    #[test]
    fn test_layout() {
        let text = render_text(&table(), &options(24));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].chars().all(|c| c == '═'));
        assert_eq!(lines[1], "Headcount");
        assert_eq!(lines[2], "Generated: 2024-05-01 09:30 UTC");
        assert_eq!(lines[3], "Records: 2");
        assert_eq!(lines[5], "name   title");
        assert!(lines[6].chars().all(|c| c == '─'));
        assert_eq!(lines[7], "Ada    Principal Engineer");
        assert_eq!(lines[8], "Grace  Rear Admiral");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_long_values_are_truncated() {
        let text = render_text(&table(), &options(10));
        assert!(text.contains("Ada    Princip..."));
        assert!(text.contains("Grace  Rear Ad..."));
    }

    #[test]
    fn test_empty_result_still_renders() {
        let empty = ReportTable {
            fields: vec!["name".to_string()],
            rows: Vec::new(),
        };
        let text = render_text(&empty, &options(24));
        assert!(text.contains("Records: 0"));
        assert!(text.contains("\nname\n"));
    }

    #[test]
    fn test_truncate_respects_characters() {
        assert_eq!(truncate("Ångström", 6), "Ång...");
        assert_eq!(truncate("short", 6), "short");
    }
}
