//! The session context: who is using the tool, for which company.
//!
//! Built once by [`App`](crate::app::App) from configuration plus command-line
//! overrides, then passed explicitly to everything that needs it.

use std::collections::HashSet;

use crate::access::{PermissionSet, Role};
use crate::domain::{Employee, EmployeeId};
use crate::hierarchy::Hierarchy;

/// The authenticated user of this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Display name.
    pub name: String,
    /// Role driving permissions and scoping.
    pub role: Role,
    /// The user's own employee record, if linked.
    pub employee_id: Option<EmployeeId>,
}

/// Company, language, user and resolved permissions.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Company (tenant) name.
    pub company: String,
    /// UI language code.
    pub language: String,
    /// Current user.
    pub user: SessionUser,
    /// Permissions resolved from the user's role.
    pub permissions: PermissionSet,
}

/// Which employee records a session may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleScope {
    /// Every record.
    All,
    /// Only these ids.
    Only(HashSet<EmployeeId>),
}

impl VisibleScope {
    /// Whether `id` is in scope.
    pub fn contains(&self, id: &EmployeeId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(id),
        }
    }

    /// Keep only in-scope employees, preserving order.
    pub fn apply(&self, employees: Vec<Employee>) -> Vec<Employee> {
        match self {
            Self::All => employees,
            Self::Only(ids) => employees
                .into_iter()
                .filter(|e| ids.contains(&e.id))
                .collect(),
        }
    }
}

impl SessionContext {
    /// Build a session and resolve its permissions.
    pub fn new(company: impl Into<String>, language: impl Into<String>, user: SessionUser) -> Self {
        let permissions = PermissionSet::for_role(user.role);
        Self {
            company: company.into(),
            language: language.into(),
            user,
            permissions,
        }
    }

    /// Self-service scoping over `employees`.
    ///
    /// Admins and HR see everyone. Managers see themselves and their whole
    /// reporting subtree. Employees see only themselves. A manager or
    /// employee session without a linked employee record sees nobody.
    pub fn visible_scope(&self, employees: &[Employee]) -> VisibleScope {
        match self.user.role {
            Role::Admin | Role::HrManager => VisibleScope::All,
            Role::Manager => {
                let Some(me) = &self.user.employee_id else {
                    return VisibleScope::Only(HashSet::new());
                };
                let hierarchy = Hierarchy::build(employees);
                let mut ids: HashSet<EmployeeId> = hierarchy
                    .descendants_of(me)
                    .into_iter()
                    .map(|e| e.id.clone())
                    .collect();
                if hierarchy.contains(me) {
                    ids.insert(me.clone());
                }
                VisibleScope::Only(ids)
            }
            Role::Employee => VisibleScope::Only(
                self.user
                    .employee_id
                    .iter()
                    .filter(|id| employees.iter().any(|e| &e.id == *id))
                    .cloned()
                    .collect(),
            ),
        }
    }
}
