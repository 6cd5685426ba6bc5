//! Positions: the budgeted seats of the organization, with their own
//! reports-to hierarchy independent of who currently fills them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{validate_name, HierarchyNode, PositionId};
use crate::error::ValidationError;

/// A position in the organization structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier.
    pub id: PositionId,
    /// Position title.
    pub title: String,
    /// Short position code (e.g. `ENG-LEAD`).
    pub code: String,
    /// Department name.
    #[serde(default)]
    pub department: String,
    /// Parent position.
    #[serde(default)]
    pub reports_to_position_id: Option<PositionId>,
    /// Allocated headcount.
    #[serde(default)]
    pub headcount: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl HierarchyNode for Position {
    type Id = PositionId;

    fn node_id(&self) -> &PositionId {
        &self.id
    }

    fn parent_id(&self) -> Option<&PositionId> {
        self.reports_to_position_id.as_ref()
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> Option<String> {
        Some(format!("{} x{}", self.code, self.headcount))
    }
}

/// Data for creating a new position.
#[derive(Debug, Clone, Default)]
pub struct NewPosition {
    /// Title (required).
    pub title: String,
    /// Code (required).
    pub code: String,
    /// Department name.
    pub department: String,
    /// Parent position.
    pub reports_to_position_id: Option<PositionId>,
    /// Allocated headcount.
    pub headcount: u32,
}

impl NewPosition {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("title", &self.title)?;
        validate_code(&self.code)
    }
}

/// Data for updating an existing position.
///
/// The parent position is changed through the guarded
/// [`App::assign_position_parent`](crate::app::App::assign_position_parent).
#[derive(Debug, Clone, Default)]
pub struct PositionUpdate {
    /// New title.
    pub title: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New headcount.
    pub headcount: Option<u32>,
}

impl PositionUpdate {
    /// Check the fields that are being changed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_name("title", title)?;
        }
        if let Some(code) = &self.code {
            validate_code(code)?;
        }
        Ok(())
    }

    /// Convert into the field patch understood by the entity store.
    pub fn into_patch(self) -> Map<String, Value> {
        let mut patch = Map::new();
        if let Some(title) = self.title {
            patch.insert("title".into(), Value::String(title.trim().to_string()));
        }
        if let Some(code) = self.code {
            patch.insert("code".into(), Value::String(code.trim().to_uppercase()));
        }
        if let Some(department) = self.department {
            patch.insert("department".into(), Value::String(department.trim().to_string()));
        }
        if let Some(headcount) = self.headcount {
            patch.insert("headcount".into(), Value::from(headcount));
        }
        patch
    }
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::Required { field: "code" });
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code",
            reason: "only letters, digits, '-' and '_' are allowed".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_code_rules() {
        let mut new = NewPosition {
            title: "Engineering Lead".to_string(),
            code: "ENG-LEAD".to_string(),
            ..Default::default()
        };
        assert!(new.validate().is_ok());

        new.code = "ENG LEAD".to_string();
        assert!(matches!(
            new.validate(),
            Err(ValidationError::InvalidFormat { field: "code", .. })
        ));

        new.code = String::new();
        assert_eq!(
            new.validate().unwrap_err(),
            ValidationError::Required { field: "code" }
        );
    }

    #[test]
    fn test_position_update_patch_uppercases_code() {
        let patch = PositionUpdate {
            code: Some("eng-2".to_string()),
            headcount: Some(4),
            ..Default::default()
        }
        .into_patch();
        assert_eq!(patch["code"], "ENG-2");
        assert_eq!(patch["headcount"], 4);
    }
}
