//! Domain types for the HR workspace.
//!
//! Employees and positions each form an independent reporting forest through
//! a nullable parent reference. Payroll records hang off employees and feed
//! the payslip export.

mod employee;
mod payroll;
mod position;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use crate::error::ValidationError;

pub use employee::{Employee, EmployeeFilter, EmployeeStatus, EmployeeUpdate, NewEmployee};
pub use payroll::{NewPayrollRecord, PayrollRecord};
pub(crate) use payroll::validate_period;
pub use position::{NewPosition, Position, PositionUpdate};

/// Maximum length of names and titles.
pub const MAX_NAME_LENGTH: usize = 200;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier of an employee.
    EmployeeId
);
entity_id!(
    /// Unique identifier of a position.
    PositionId
);
entity_id!(
    /// Unique identifier of a payroll record.
    PayrollId
);

/// The entity collections held by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Employee records.
    Employee,
    /// Position records.
    Position,
    /// Payroll records.
    Payroll,
}

impl EntityKind {
    /// Snapshot file name for this collection.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Employee => "employees.jsonl",
            Self::Position => "positions.jsonl",
            Self::Payroll => "payroll.jsonl",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employee => write!(f, "Employee"),
            Self::Position => write!(f, "Position"),
            Self::Payroll => write!(f, "Payroll record"),
        }
    }
}

/// A record that takes part in a parent/child reporting forest.
///
/// Implemented by [`Employee`] (via `manager_id`) and [`Position`] (via
/// `reports_to_position_id`), so hierarchy building, cycle guarding and tree
/// export are written once for both.
pub trait HierarchyNode {
    /// Identifier type of the record.
    type Id: Clone + Eq + Hash + Ord + fmt::Display;

    /// This record's identifier.
    fn node_id(&self) -> &Self::Id;

    /// The declared parent, if any. May dangle.
    fn parent_id(&self) -> Option<&Self::Id>;

    /// Primary display text (name or title).
    fn label(&self) -> &str;

    /// Secondary display text (job title, department, headcount).
    fn subtitle(&self) -> Option<String>;
}

/// Validate a required single-line name/title field.
pub(crate) fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    let len = value.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
            actual: len,
        });
    }

    if let Some(position) = value.chars().position(char::is_control) {
        return Err(ValidationError::ControlCharacter { field, position });
    }

    Ok(())
}
