//! Report predicates.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{render_value, Record};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Case-insensitive equality.
    Equals,
    /// Case-insensitive substring.
    Contains,
    /// Case-insensitive prefix.
    StartsWith,
    /// Numeric `>`.
    GreaterThan,
    /// Numeric `<`.
    LessThan,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals => write!(f, "equals"),
            Self::Contains => write!(f, "contains"),
            Self::StartsWith => write!(f, "starts_with"),
            Self::GreaterThan => write!(f, "greater_than"),
            Self::LessThan => write!(f, "less_than"),
        }
    }
}

impl FromStr for Operator {
    type Err = PredicateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equals" | "eq" | "=" => Ok(Self::Equals),
            "contains" => Ok(Self::Contains),
            "starts_with" | "starts-with" => Ok(Self::StartsWith),
            "greater_than" | "greater-than" | "gt" | ">" => Ok(Self::GreaterThan),
            "less_than" | "less-than" | "lt" | "<" => Ok(Self::LessThan),
            other => Err(PredicateParseError::UnknownOperator(other.to_string())),
        }
    }
}

/// Errors parsing the `field:operator:value` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateParseError {
    /// Fewer than three `:`-separated parts.
    #[error("expected 'field:operator:value', got '{0}'")]
    Shape(String),
    /// Operator name not recognized.
    #[error("unknown operator '{0}' (expected equals, contains, starts_with, greater_than or less_than)")]
    UnknownOperator(String),
}

/// A single `field operator value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Record field to test.
    pub field: String,
    /// Comparison.
    pub operator: Operator,
    /// Right-hand side, as typed by the user.
    pub value: String,
}

impl Predicate {
    /// Build a predicate.
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Predicates with an empty field or value filter nothing.
    pub fn is_active(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }

    /// Whether `record` passes.
    ///
    /// Numeric operators exclude the record when either side is not a number.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.is_active() {
            return true;
        }

        let actual = render_value(record.get(&self.field));
        match self.operator {
            Operator::Equals => actual.to_lowercase() == self.value.to_lowercase(),
            Operator::Contains => actual.to_lowercase().contains(&self.value.to_lowercase()),
            Operator::StartsWith => actual
                .to_lowercase()
                .starts_with(&self.value.to_lowercase()),
            Operator::GreaterThan => compare_numbers(record.get(&self.field), &self.value)
                .is_some_and(|(a, b)| a > b),
            Operator::LessThan => compare_numbers(record.get(&self.field), &self.value)
                .is_some_and(|(a, b)| a < b),
        }
    }
}

fn compare_numbers(actual: Option<&Value>, expected: &str) -> Option<(f64, f64)> {
    let actual = match actual? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s)?,
        _ => return None,
    };
    Some((actual, parse_number(expected)?))
}

/// `f64::from_str` also takes "inf" and "NaN"; those are text, not numbers.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl FromStr for Predicate {
    type Err = PredicateParseError;

    /// Parse `field:operator:value`. The value may itself contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(operator), Some(value)) => Ok(Self::new(
                field.trim(),
                operator.parse()?,
                value.trim(),
            )),
            _ => Err(PredicateParseError::Shape(s.to_string())),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn row(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    #[rstest]
    #[case::equals_exact(Operator::Equals, "Engineering", true)]
    #[case::equals_lower(Operator::Equals, "engineering", true)]
    #[case::equals_partial(Operator::Equals, "Eng", false)]
    #[case::contains(Operator::Contains, "GINEER", true)]
    #[case::starts_with(Operator::StartsWith, "eng", true)]
    #[case::starts_with_miss(Operator::StartsWith, "ring", false)]
    fn test_string_operators(
        #[case] operator: Operator,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        let record = row(json!({"department": "Engineering"}));
        assert_eq!(
            Predicate::new("department", operator, value).matches(&record),
            expected
        );
    }

    #[rstest]
    #[case::greater(Operator::GreaterThan, "4000", true)]
    #[case::not_greater(Operator::GreaterThan, "6000", false)]
    #[case::less(Operator::LessThan, "6000", true)]
    #[case::decimal(Operator::LessThan, "5200.5", true)]
    #[case::non_numeric_value(Operator::GreaterThan, "lots", false)]
    #[case::infinity_value(Operator::LessThan, "inf", false)]
    #[case::nan_value(Operator::GreaterThan, "NaN", false)]
    fn test_numeric_operators(
        #[case] operator: Operator,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        let record = row(json!({"salary": 5200}));
        assert_eq!(
            Predicate::new("salary", operator, value).matches(&record),
            expected
        );
    }

    #[rstest]
    #[case::word("Infinity")]
    #[case::short("inf")]
    #[case::nan("NaN")]
    fn test_float_keywords_in_text_fields_are_not_numbers(#[case] text: &str) {
        let record = row(json!({"note": text}));
        assert!(!Predicate::new("note", Operator::GreaterThan, "100").matches(&record));
        assert!(!Predicate::new("note", Operator::LessThan, "100").matches(&record));
    }

    #[test]
    fn test_numeric_operator_on_text_field_excludes_row() {
        let record = row(json!({"salary": "n/a"}));
        assert!(!Predicate::new("salary", Operator::GreaterThan, "0").matches(&record));
        assert!(!Predicate::new("salary", Operator::LessThan, "0").matches(&record));
    }

    #[test]
    fn test_numeric_string_values_compare() {
        let record = row(json!({"headcount": " 12 "}));
        assert!(Predicate::new("headcount", Operator::GreaterThan, "3").matches(&record));
    }

    #[rstest]
    #[case::empty_value(Predicate::new("department", Operator::Equals, ""))]
    #[case::empty_field(Predicate::new("", Operator::Equals, "x"))]
    fn test_inactive_predicate_is_noop(#[case] predicate: Predicate) {
        assert!(!predicate.is_active());
        assert!(predicate.matches(&row(json!({"department": "Sales"}))));
    }

    #[test]
    fn test_parse_cli_form() {
        let predicate: Predicate = "period:starts_with:2024-05".parse().unwrap();
        assert_eq!(predicate, Predicate::new("period", Operator::StartsWith, "2024-05"));

        let with_colon: Predicate = "note:contains:a:b".parse().unwrap();
        assert_eq!(with_colon.value, "a:b");
        assert_eq!(with_colon.to_string(), "note:contains:a:b");
    }

    #[rstest]
    #[case::missing_value("department:equals")]
    #[case::bad_operator("department:like:Eng")]
    fn test_parse_errors(#[case] input: &str) {
        assert!(input.parse::<Predicate>().is_err());
    }
}
