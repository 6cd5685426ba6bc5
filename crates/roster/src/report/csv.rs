//! CSV rendering.

use super::ReportTable;

/// Render `table` as CSV: a header row, then one line per row, joined by `\n`.
pub fn to_csv(table: &ReportTable) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(join_line(&table.fields));
    lines.extend(table.rows.iter().map(|row| join_line(row)));
    lines.join("\n")
}

fn join_line(values: &[String]) -> String {
    values
        .iter()
        .map(|v| escape(v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote values containing a comma, doubling embedded quotes.
///
/// Values with a double quote or a line break are quoted as well, although
/// plain comma quoting would leave them bare: a bare value starting with `"`
/// or spanning lines does not read back as the same cell.
fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Ada", "Ada")]
    #[case::comma("Smith, John", "\"Smith, John\"")]
    #[case::quote("The \"Boss\"", "\"The \"\"Boss\"\"\"")]
    #[case::newline("two\nlines", "\"two\nlines\"")]
    #[case::leading_quote("\"Ace\" team", "\"\"\"Ace\"\" team\"")]
    #[case::empty("", "")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn test_header_and_rows() {
        let table = ReportTable {
            fields: vec!["name".to_string(), "department".to_string()],
            rows: vec![
                vec!["Ada".to_string(), "R&D".to_string()],
                vec!["Smith, John".to_string(), "Sales".to_string()],
            ],
        };
        assert_eq!(
            to_csv(&table),
            "name,department\nAda,R&D\n\"Smith, John\",Sales"
        );
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let table = ReportTable {
            fields: vec!["name".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(to_csv(&table), "name");
    }
}
