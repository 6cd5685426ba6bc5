//! JSONL reading operations.
//!
//! Line-by-line buffered reading with 1-based line number tracking, so decode
//! failures can point at the record that caused them.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{Error, Result};

/// A raw line read from a JSONL source, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    /// A non-blank line with its 1-based line number.
    Text {
        /// 1-based line number.
        line_number: usize,
        /// Line content without the trailing newline.
        content: String,
    },
    /// A line whose bytes are not valid UTF-8.
    InvalidUtf8 {
        /// 1-based line number.
        line_number: usize,
    },
}

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader in a [`BufReader`] and tracks the
/// number of lines consumed. Blank lines (including whitespace-only lines)
/// are skipped but still counted.
///
/// # Examples
///
/// ```no_run
/// use roster_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("employees.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(record) = reader.read_line::<serde_json::Value>().await? {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// Lines consumed so far (0 before the first read).
    line_number: usize,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Returns the 1-based number of the last line read, or 0 before any read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next non-blank line without decoding it.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    pub async fn read_raw_line(&mut self) -> Result<Option<RawLine>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = self.reader.read_until(b'\n', &mut buf).await?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let Ok(text) = std::str::from_utf8(&buf) else {
                return Ok(Some(RawLine::InvalidUtf8 {
                    line_number: self.line_number,
                }));
            };

            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            return Ok(Some(RawLine::Text {
                line_number: self.line_number,
                content: trimmed.to_string(),
            }));
        }
    }

    /// Reads and decodes the next non-blank line.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLine`] if the line is not valid UTF-8 or does not
    /// decode into `T`, and [`Error::Io`] if the underlying reader fails.
    pub async fn read_line<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        match self.read_raw_line().await? {
            None => Ok(None),
            Some(RawLine::InvalidUtf8 { line_number }) => Err(Error::InvalidLine {
                line_number,
                message: "invalid UTF-8".to_string(),
            }),
            Some(RawLine::Text {
                line_number,
                content,
            }) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| Error::InvalidLine {
                    line_number,
                    message: e.to_string(),
                }),
        }
    }
}
