//! Typed permission table: role x module -> access level.
//!
//! Resolved once per session into a [`PermissionSet`] and consulted by every
//! command before it reads or writes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AccessError;

/// Session roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every module.
    #[default]
    Admin,
    /// HR staff: manage people data, payroll and reports.
    HrManager,
    /// Line manager: manager self-service over their own subtree.
    Manager,
    /// Employee self-service.
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::HrManager => write!(f, "hr_manager"),
            Self::Manager => write!(f, "manager"),
            Self::Employee => write!(f, "employee"),
        }
    }
}

/// Functional areas of the HR system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Employee records.
    Employees,
    /// Org chart and reporting lines.
    OrgChart,
    /// Position structure.
    Positions,
    /// Time and attendance.
    Attendance,
    /// Leave requests.
    Leave,
    /// Payroll and payslips.
    Payroll,
    /// Onboarding checklists.
    Onboarding,
    /// Report builder.
    Reports,
    /// Self-service portal.
    SelfService,
}

impl Module {
    /// Every module, in menu order.
    pub const ALL: [Module; 9] = [
        Module::Employees,
        Module::OrgChart,
        Module::Positions,
        Module::Attendance,
        Module::Leave,
        Module::Payroll,
        Module::Onboarding,
        Module::Reports,
        Module::SelfService,
    ];
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employees => write!(f, "employees"),
            Self::OrgChart => write!(f, "org_chart"),
            Self::Positions => write!(f, "positions"),
            Self::Attendance => write!(f, "attendance"),
            Self::Leave => write!(f, "leave"),
            Self::Payroll => write!(f, "payroll"),
            Self::Onboarding => write!(f, "onboarding"),
            Self::Reports => write!(f, "reports"),
            Self::SelfService => write!(f, "self_service"),
        }
    }
}

/// Access level, ordered `None < Read < Write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Module hidden.
    None,
    /// View only.
    Read,
    /// View and modify.
    Write,
}

impl Access {
    fn verb(self) -> &'static str {
        match self {
            Self::None => "see",
            Self::Read => "read",
            Self::Write => "modify",
        }
    }
}

/// The static capability table.
pub fn access_for(role: Role, module: Module) -> Access {
    use Access::{None, Read, Write};
    use Module::{
        Attendance, Employees, Leave, Onboarding, OrgChart, Payroll, Positions, Reports,
        SelfService,
    };

    match (role, module) {
        (Role::Admin | Role::HrManager, _) => Write,

        (Role::Manager, Employees | OrgChart | Positions | Onboarding | Reports) => Read,
        (Role::Manager, Attendance | Leave | SelfService) => Write,
        (Role::Manager, Payroll) => None,

        (Role::Employee, OrgChart) => Read,
        (Role::Employee, Attendance | Leave | SelfService) => Write,
        (Role::Employee, Employees | Positions | Payroll | Onboarding | Reports) => None,
    }
}

/// A role's resolved permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    role: Role,
    table: [Access; Module::ALL.len()],
}

impl PermissionSet {
    /// Resolve the table for `role`.
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            table: Module::ALL.map(|module| access_for(role, module)),
        }
    }

    /// The role these permissions belong to.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Access level for `module`.
    pub fn access(&self, module: Module) -> Access {
        self.table[module as usize]
    }

    /// Whether `module` is at least readable.
    pub fn can_read(&self, module: Module) -> bool {
        self.access(module) >= Access::Read
    }

    /// Whether `module` is writable.
    pub fn can_write(&self, module: Module) -> bool {
        self.access(module) >= Access::Write
    }

    /// Modules visible to this role, in menu order.
    pub fn visible_modules(&self) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|&m| self.can_read(m))
            .collect()
    }

    /// Fail unless the role has at least `needed` on `module`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Denied`] when access is insufficient.
    pub fn require(&self, module: Module, needed: Access) -> Result<(), AccessError> {
        let allowed = match needed {
            Access::None => true,
            Access::Read => self.can_read(module),
            Access::Write => self.can_write(module),
        };
        if allowed {
            Ok(())
        } else {
            Err(AccessError::Denied {
                role: self.role,
                module,
                action: needed.verb(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_table_order_matches_discriminants() {
        for (i, module) in Module::ALL.into_iter().enumerate() {
            assert_eq!(module as usize, i);
        }
    }

    #[rstest]
    #[case(Role::Admin, Module::Payroll, Access::Write)]
    #[case(Role::HrManager, Module::Reports, Access::Write)]
    #[case(Role::Manager, Module::OrgChart, Access::Read)]
    #[case(Role::Manager, Module::Payroll, Access::None)]
    #[case(Role::Employee, Module::OrgChart, Access::Read)]
    #[case(Role::Employee, Module::Employees, Access::None)]
    #[case(Role::Employee, Module::SelfService, Access::Write)]
    fn test_access_table(#[case] role: Role, #[case] module: Module, #[case] expected: Access) {
        assert_eq!(PermissionSet::for_role(role).access(module), expected);
    }

    #[test]
    fn test_require_reports_role_and_module() {
        let permissions = PermissionSet::for_role(Role::Manager);
        assert!(permissions.require(Module::Employees, Access::Read).is_ok());

        let err = permissions
            .require(Module::Employees, Access::Write)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Role 'manager' is not allowed to modify employees"
        );
    }

    #[rstest]
    #[case::hr_reports(Role::HrManager, Module::Reports, true)]
    #[case::manager_org_chart(Role::Manager, Module::OrgChart, false)]
    #[case::employee_self_service(Role::Employee, Module::SelfService, true)]
    #[case::employee_payroll(Role::Employee, Module::Payroll, false)]
    fn test_can_write_matches_require(
        #[case] role: Role,
        #[case] module: Module,
        #[case] expected: bool,
    ) {
        let permissions = PermissionSet::for_role(role);
        assert_eq!(permissions.can_write(module), expected);
        assert_eq!(permissions.require(module, Access::Write).is_ok(), expected);
    }

    #[test]
    fn test_employee_menu() {
        let visible = PermissionSet::for_role(Role::Employee).visible_modules();
        assert_eq!(
            visible,
            vec![
                Module::OrgChart,
                Module::Attendance,
                Module::Leave,
                Module::SelfService
            ]
        );
    }
}
