//! CLI input validation functions.
//!
//! Used by clap's `value_parser` attribute so bad input is reported at parse
//! time, before any file is touched.

use chrono::NaiveDate;

use crate::domain::validate_period as validate_pay_period;
use crate::report::Predicate;

/// Validate an id prefix.
///
/// Delegates to the config validator so the rules live in one place.
pub fn validate_prefix(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    crate::config::validate_prefix(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Validate a record id of the form `prefix-suffix`.
pub fn validate_record_id(s: &str) -> Result<String, String> {
    let s = s.trim();
    let Some((prefix, suffix)) = s.split_once('-') else {
        return Err(format!(
            "Invalid id '{s}'. Expected format: prefix-suffix (e.g., acme-k3v9)"
        ));
    };

    validate_prefix(prefix).map_err(|e| format!("Id {}", e.to_lowercase()))?;

    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("Id suffix of '{s}' must be non-empty and alphanumeric"));
    }

    Ok(s.to_string())
}

/// Parse a report predicate in `field:operator:value` form.
pub fn parse_predicate(s: &str) -> Result<Predicate, String> {
    s.parse::<Predicate>().map_err(|e| e.to_string())
}

/// Parse a non-negative money amount.
pub fn parse_amount(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{s}' must be a non-negative amount"));
    }
    Ok(value)
}

/// Validate a `YYYY-MM` pay period.
pub fn validate_period(s: &str) -> Result<String, String> {
    let s = s.trim();
    validate_pay_period(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{s}' is not a date in YYYY-MM-DD form"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Operator;
    use rstest::rstest;

    #[rstest]
    #[case::generated("acme-k3v9")]
    #[case::padded("  acme-k3v9  ")]
    #[case::numeric_suffix("globex-0042")]
    fn test_validate_record_id_accepts(#[case] id: &str) {
        assert_eq!(validate_record_id(id).unwrap(), id.trim());
    }

    #[rstest]
    #[case::no_hyphen("acmek3v9", "Expected format")]
    #[case::short_prefix("a-k3v9", "at least 2")]
    #[case::empty_suffix("acme-", "suffix")]
    #[case::symbol_suffix("acme-k3_9", "suffix")]
    fn test_validate_record_id_rejects(#[case] id: &str, #[case] expected: &str) {
        let err = validate_record_id(id).unwrap_err();
        assert!(err.contains(expected), "expected '{expected}' in '{err}'");
    }

    #[test]
    fn test_parse_predicate() {
        let p = parse_predicate("department:equals:Engineering").unwrap();
        assert_eq!(p.field, "department");
        assert_eq!(p.operator, Operator::Equals);
        assert!(parse_predicate("department").is_err());
        assert!(parse_predicate("department:like:x").is_err());
    }

    #[rstest]
    #[case("0", Some(0.0))]
    #[case("1250.50", Some(1250.5))]
    #[case("-1", None)]
    #[case("NaN", None)]
    #[case("ten", None)]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_amount(input).ok(), expected);
    }

    #[test]
    fn test_validate_period_and_date() {
        assert_eq!(validate_period(" 2024-05 ").unwrap(), "2024-05");
        assert!(validate_period("2024-13").is_err());
        assert_eq!(
            parse_date("2023-01-09").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap()
        );
        assert!(parse_date("09/01/2023").is_err());
    }
}
