//! Non-fatal problems found while loading a JSONL snapshot.

use std::fmt;

/// A non-fatal warning produced by [`read_jsonl_resilient`](crate::read_jsonl_resilient).
///
/// The offending line is skipped; every other record still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A non-blank line was not valid JSON for the expected record type.
    MalformedJson {
        /// The 1-based line number.
        line_number: usize,
        /// The decoder's error message.
        error: String,
    },

    /// A line was skipped before decoding (for example, invalid UTF-8).
    SkippedLine {
        /// The 1-based line number.
        line_number: usize,
        /// Why the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a short machine-friendly identifier for the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => write!(f, "line {line_number}: skipped: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_number() {
        let warning = Warning::MalformedJson {
            line_number: 7,
            error: "expected value".to_string(),
        };
        assert_eq!(warning.to_string(), "line 7: malformed JSON: expected value");
        assert_eq!(warning.line_number(), 7);
        assert_eq!(warning.kind(), "malformed_json");
    }
}
