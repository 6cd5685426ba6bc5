//! CLI value enums and their domain conversions.

use clap::ValueEnum;

use crate::access::Role;
use crate::app::ReportSource;
use crate::domain::EmployeeStatus;

/// Session role override.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    /// Full access
    Admin,
    /// HR staff
    #[value(name = "hr_manager", alias = "hr-manager", alias = "hr")]
    HrManager,
    /// Line manager (own subtree)
    Manager,
    /// Employee self-service
    Employee,
}

impl std::fmt::Display for RoleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Role::from(*self).fmt(f)
    }
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::HrManager => Role::HrManager,
            RoleArg::Manager => Role::Manager,
            RoleArg::Employee => Role::Employee,
        }
    }
}

/// Employment status for CLI arguments.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusArg {
    /// Employed and working
    #[default]
    Active,
    /// On leave
    #[value(name = "on_leave", alias = "on-leave")]
    OnLeave,
    /// No longer employed
    Terminated,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        EmployeeStatus::from(*self).fmt(f)
    }
}

impl From<StatusArg> for EmployeeStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => EmployeeStatus::Active,
            StatusArg::OnLeave => EmployeeStatus::OnLeave,
            StatusArg::Terminated => EmployeeStatus::Terminated,
        }
    }
}

/// Collection a report reads from.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceArg {
    /// Employee records
    #[default]
    Employees,
    /// Position records
    Positions,
    /// Payroll records
    Payroll,
}

impl std::fmt::Display for SourceArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employees => write!(f, "employees"),
            Self::Positions => write!(f, "positions"),
            Self::Payroll => write!(f, "payroll"),
        }
    }
}

impl From<SourceArg> for ReportSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Employees => ReportSource::Employees,
            SourceArg::Positions => ReportSource::Positions,
            SourceArg::Payroll => ReportSource::Payroll,
        }
    }
}

/// Report output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    /// Fixed-width text table with a banner
    #[default]
    Text,
    /// Comma-separated values
    Csv,
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
