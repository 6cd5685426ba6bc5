//! Error types for roster operations.
//!
//! The taxonomy is deliberately small: store/service failures, validation
//! failures (required fields, reporting-line cycles), configuration problems
//! and permission denials. "No data" is never an error.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::access::{Module, Role};
use crate::domain::EntityKind;

/// The error type for roster operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or workspace discovery error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Entity store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A reporting-line change was rejected by the cycle guard.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// The session is not allowed to perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.roster/` directory was found in the directory tree.
    #[error("Not a roster workspace (or any parent up to the filesystem root). Run 'roster init' first.")]
    NotInitialized,

    /// `roster init` was run where a workspace already exists.
    #[error("Roster is already initialized here. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The id prefix does not satisfy the naming rules.
    #[error("Invalid id prefix: {0}")]
    InvalidPrefix(String),

    /// The configuration file could not be parsed or written.
    #[error("Configuration error: {0}")]
    Parse(String),
}

/// Entity store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind that was looked up.
        kind: EntityKind,
        /// Identifier that was not found.
        id: String,
    },

    /// An update patch referenced a field that cannot be changed.
    #[error("Invalid update: {0}")]
    InvalidPatch(String),

    /// ID generation failed.
    #[error("ID generation failed: {0}")]
    IdGeneration(String),

    /// Snapshot file I/O failed.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] roster_jsonl::Error),

    /// Saving would drop lines that could not be loaded.
    #[error(
        "Refusing to overwrite '{}': {skipped} line(s) could not be loaded and would be lost. Repair the file first.",
        .path.display()
    )]
    DamagedSnapshot {
        /// The snapshot file.
        path: PathBuf,
        /// Number of lines left out at load.
        skipped: usize,
    },
}

/// Field validation errors, reported before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required {
        /// Field name.
        field: &'static str,
    },

    /// A field exceeds its maximum length.
    #[error("{field} cannot exceed {max} characters, got {actual}")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        actual: usize,
    },

    /// A field contains a control character.
    #[error("{field} contains an invalid control character at position {position}")]
    ControlCharacter {
        /// Field name.
        field: &'static str,
        /// Character position of the first offending character.
        position: usize,
    },

    /// A field has the wrong format.
    #[error("{field} is invalid: {reason}")]
    InvalidFormat {
        /// Field name.
        field: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// A reference points at a record that does not exist.
    #[error("{field} refers to unknown record '{id}'")]
    UnknownReference {
        /// Field name.
        field: &'static str,
        /// The dangling identifier.
        id: String,
    },
}

/// Reporting-line changes rejected by the cycle guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The record was asked to report to itself.
    #[error("{id} cannot report to itself")]
    SelfReference {
        /// The record being reassigned.
        id: String,
    },

    /// The candidate is below the target, so the change would close a loop.
    #[error("Assigning {candidate} as the manager of {target} would create a circular reporting structure")]
    WouldCreateCycle {
        /// The record being reassigned.
        target: String,
        /// The proposed new parent.
        candidate: String,
    },
}

/// Permission failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The session role lacks the required access to a module.
    #[error("Role '{role}' is not allowed to {action} {module}")]
    Denied {
        /// Session role.
        role: Role,
        /// Module being accessed.
        module: Module,
        /// "read" or "modify".
        action: &'static str,
    },
}

/// A specialized Result type for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<roster_jsonl::Error> for Error {
    fn from(err: roster_jsonl::Error) -> Self {
        Error::Store(StoreError::Snapshot(err))
    }
}
