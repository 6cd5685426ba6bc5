//! JSONL (JSON Lines) snapshot I/O for roster entity collections.
//!
//! Each entity collection (employees, positions, payroll records) is stored as
//! one JSON object per line. This crate provides the buffered reader and
//! writer, crash-safe atomic saves, and a resilient loader that skips damaged
//! lines and reports them as [`Warning`]s instead of failing the whole load.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod resilient;
pub mod warning;
pub mod writer;

pub use atomic::write_jsonl_atomic;
pub use error::{Error, Result};
pub use reader::JsonlReader;
pub use resilient::read_jsonl_resilient;
pub use warning::Warning;
pub use writer::JsonlWriter;
