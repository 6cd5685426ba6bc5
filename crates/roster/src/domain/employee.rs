//! Employee records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::{validate_name, EmployeeId, HierarchyNode, PositionId};
use crate::error::ValidationError;

/// An employee as held by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,

    /// Full name.
    pub name: String,

    /// Job title.
    pub job_title: String,

    /// Department name.
    #[serde(default)]
    pub department: String,

    /// Direct manager. `None`, or an id missing from the snapshot, makes this
    /// employee a root of the org chart.
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,

    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,

    /// Work email.
    #[serde(default)]
    pub email: Option<String>,

    /// Position held, if tracked.
    #[serde(default)]
    pub position_id: Option<PositionId>,

    /// Hire date.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and working.
    #[default]
    Active,
    /// Employed but on leave.
    OnLeave,
    /// No longer employed.
    Terminated,
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::OnLeave => write!(f, "on_leave"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

impl HierarchyNode for Employee {
    type Id = EmployeeId;

    fn node_id(&self) -> &EmployeeId {
        &self.id
    }

    fn parent_id(&self) -> Option<&EmployeeId> {
        self.manager_id.as_ref()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Option<String> {
        match (self.job_title.is_empty(), self.department.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.job_title.clone()),
            (true, false) => Some(self.department.clone()),
            (false, false) => Some(format!("{}, {}", self.job_title, self.department)),
        }
    }
}

/// Data for creating a new employee.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    /// Full name (required).
    pub name: String,
    /// Job title (required).
    pub job_title: String,
    /// Department name.
    pub department: String,
    /// Initial manager.
    pub manager_id: Option<EmployeeId>,
    /// Initial status.
    pub status: EmployeeStatus,
    /// Work email.
    pub email: Option<String>,
    /// Position held.
    pub position_id: Option<PositionId>,
    /// Hire date.
    pub hire_date: Option<NaiveDate>,
}

impl NewEmployee {
    /// Check required fields and formats.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)?;
        validate_name("job_title", &self.job_title)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Data for updating an existing employee.
///
/// The manager is deliberately absent: reporting-line changes go through the
/// cycle guard in [`App::assign_manager`](crate::app::App::assign_manager).
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    /// New name.
    pub name: Option<String>,
    /// New job title.
    pub job_title: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New status.
    pub status: Option<EmployeeStatus>,
    /// New email (`Some(None)` clears it).
    pub email: Option<Option<String>>,
    /// New position (`Some(None)` clears it).
    pub position_id: Option<Option<PositionId>>,
}

impl EmployeeUpdate {
    /// Check the fields that are being changed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(job_title) = &self.job_title {
            validate_name("job_title", job_title)?;
        }
        if let Some(Some(email)) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.job_title.is_none()
            && self.department.is_none()
            && self.status.is_none()
            && self.email.is_none()
            && self.position_id.is_none()
    }

    /// Convert into the field patch understood by the entity store.
    pub fn into_patch(self) -> Map<String, Value> {
        let mut patch = Map::new();
        if let Some(name) = self.name {
            patch.insert("name".into(), Value::String(name.trim().to_string()));
        }
        if let Some(job_title) = self.job_title {
            patch.insert("job_title".into(), Value::String(job_title.trim().to_string()));
        }
        if let Some(department) = self.department {
            patch.insert("department".into(), Value::String(department.trim().to_string()));
        }
        if let Some(status) = self.status {
            patch.insert("status".into(), Value::String(status.to_string()));
        }
        if let Some(email) = self.email {
            patch.insert("email".into(), email.map_or(Value::Null, Value::String));
        }
        if let Some(position_id) = self.position_id {
            patch.insert(
                "position_id".into(),
                position_id.map_or(Value::Null, |id| Value::String(id.0)),
            );
        }
        patch
    }
}

/// Filter for listing employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Department, compared case-insensitively.
    pub department: Option<String>,
    /// Exact status.
    pub status: Option<EmployeeStatus>,
    /// Direct manager.
    pub manager_id: Option<EmployeeId>,
}

impl EmployeeFilter {
    /// Whether the employee satisfies every set criterion.
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(department) = &self.department
            && !employee.department.eq_ignore_ascii_case(department)
        {
            return false;
        }
        if let Some(status) = self.status
            && employee.status != status
        {
            return false;
        }
        if let Some(manager_id) = &self.manager_id
            && employee.manager_id.as_ref() != Some(manager_id)
        {
            return false;
        }
        true
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email",
            reason: format!("'{email}' is not an email address"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(department: &str, status: EmployeeStatus) -> Employee {
        let now = Utc::now();
        Employee {
            id: EmployeeId::new("acme-1"),
            name: "Ada".to_string(),
            job_title: "Engineer".to_string(),
            department: department.to_string(),
            manager_id: Some(EmployeeId::new("acme-0")),
            status,
            email: None,
            position_id: None,
            hire_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_employee_requires_name_and_title() {
        let missing_title = NewEmployee {
            name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(
            missing_title.validate().unwrap_err(),
            ValidationError::Required { field: "job_title" }
        );
    }

    #[test]
    fn test_new_employee_rejects_bad_email() {
        let new = NewEmployee {
            name: "Ada".to_string(),
            job_title: "Engineer".to_string(),
            email: Some("ada-at-example".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            new.validate(),
            Err(ValidationError::InvalidFormat { field: "email", .. })
        ));
    }

    #[test]
    fn test_update_patch_contains_only_set_fields() {
        let update = EmployeeUpdate {
            department: Some(" Finance ".to_string()),
            email: Some(None),
            ..Default::default()
        };
        let patch = update.into_patch();
        assert_eq!(patch.len(), 2);
        assert_eq!(patch["department"], "Finance");
        assert_eq!(patch["email"], Value::Null);
    }

    #[test]
    fn test_filter_department_is_case_insensitive() {
        let filter = EmployeeFilter {
            department: Some("engineering".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&employee("Engineering", EmployeeStatus::Active)));
        assert!(!filter.matches(&employee("Sales", EmployeeStatus::Active)));
    }

    #[test]
    fn test_filter_by_status_and_manager() {
        let filter = EmployeeFilter {
            status: Some(EmployeeStatus::OnLeave),
            manager_id: Some(EmployeeId::new("acme-0")),
            ..Default::default()
        };
        assert!(filter.matches(&employee("Ops", EmployeeStatus::OnLeave)));
        assert!(!filter.matches(&employee("Ops", EmployeeStatus::Active)));
    }

    #[test]
    fn test_subtitle_combines_title_and_department() {
        let e = employee("Engineering", EmployeeStatus::Active);
        assert_eq!(e.subtitle().as_deref(), Some("Engineer, Engineering"));
    }
}
