//! CLI argument structs for all commands.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::{FormatArg, SourceArg, StatusArg};
use super::validators::{
    parse_amount, parse_date, parse_predicate, validate_period, validate_prefix,
    validate_record_id,
};
use crate::report::Predicate;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Company name shown on reports and payslips
    #[arg(short, long)]
    pub company: Option<String>,

    /// Id prefix (e.g., "acme" for "acme-k3v9")
    ///
    /// Must be 2-20 alphanumeric characters. Defaults to the lowercased
    /// company name when that is a valid prefix.
    #[arg(short, long, value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

// ========== employee ==========

/// Arguments for the `employee` command
#[derive(Parser, Debug, Clone)]
pub struct EmployeeArgs {
    /// Employee action
    #[command(subcommand)]
    pub action: EmployeeAction,
}

/// Employee subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum EmployeeAction {
    /// Add an employee
    Add(EmployeeAddArgs),

    /// List employees visible to this session
    List(EmployeeListArgs),

    /// Show an employee with manager and direct reports
    Show {
        /// Employee id
        #[arg(value_parser = validate_record_id)]
        id: String,
    },

    /// Update non-hierarchy fields of an employee
    ///
    /// Use `roster org assign` to change the manager.
    Update(EmployeeUpdateArgs),

    /// Delete an employee
    ///
    /// Direct reports keep their manager reference and become roots of the
    /// org chart until reassigned.
    Delete {
        /// Employee id
        #[arg(value_parser = validate_record_id)]
        id: String,
    },
}

/// Arguments for `employee add`
#[derive(Args, Debug, Clone)]
pub struct EmployeeAddArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Job title
    #[arg(short = 't', long = "title")]
    pub job_title: String,

    /// Department
    #[arg(short, long)]
    pub department: Option<String>,

    /// Manager id
    #[arg(short, long, value_parser = validate_record_id)]
    pub manager: Option<String>,

    /// Position id
    #[arg(long, value_parser = validate_record_id)]
    pub position: Option<String>,

    /// Work email
    #[arg(short, long)]
    pub email: Option<String>,

    /// Employment status
    #[arg(short, long, value_enum, default_value = "active")]
    pub status: StatusArg,

    /// Hire date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub hire_date: Option<NaiveDate>,
}

/// Arguments for `employee list`
#[derive(Args, Debug, Clone)]
pub struct EmployeeListArgs {
    /// Filter by department (case-insensitive)
    #[arg(short, long)]
    pub department: Option<String>,

    /// Filter by status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Filter by direct manager
    #[arg(short, long, value_parser = validate_record_id)]
    pub manager: Option<String>,
}

/// Arguments for `employee update`
#[derive(Args, Debug, Clone)]
pub struct EmployeeUpdateArgs {
    /// Employee id
    #[arg(value_parser = validate_record_id)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New job title
    #[arg(short = 't', long = "title")]
    pub job_title: Option<String>,

    /// New department
    #[arg(short, long)]
    pub department: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// New email
    #[arg(short, long, conflicts_with = "no_email")]
    pub email: Option<String>,

    /// Clear the email
    #[arg(long)]
    pub no_email: bool,

    /// New position id
    #[arg(long, value_parser = validate_record_id, conflicts_with = "no_position")]
    pub position: Option<String>,

    /// Clear the position
    #[arg(long)]
    pub no_position: bool,
}

// ========== position ==========

/// Arguments for the `position` command
#[derive(Parser, Debug, Clone)]
pub struct PositionArgs {
    /// Position action
    #[command(subcommand)]
    pub action: PositionAction,
}

/// Position subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PositionAction {
    /// Add a position
    Add(PositionAddArgs),

    /// List positions
    List,

    /// Update a position's details
    Update(PositionUpdateArgs),

    /// Change what a position reports to
    Move {
        /// Position id
        #[arg(value_parser = validate_record_id)]
        id: String,

        /// New parent position
        #[arg(long, value_parser = validate_record_id, required_unless_present = "root")]
        reports_to: Option<String>,

        /// Make the position a root
        #[arg(long, conflicts_with = "reports_to")]
        root: bool,
    },
}

/// Arguments for `position add`
#[derive(Args, Debug, Clone)]
pub struct PositionAddArgs {
    /// Position title
    #[arg(short = 't', long)]
    pub title: String,

    /// Position code (e.g., ENG-LEAD)
    #[arg(short, long)]
    pub code: String,

    /// Department
    #[arg(short, long)]
    pub department: Option<String>,

    /// Parent position id
    #[arg(long, value_parser = validate_record_id)]
    pub reports_to: Option<String>,

    /// Allocated headcount
    #[arg(long, default_value = "1")]
    pub headcount: u32,
}

/// Arguments for `position update`
#[derive(Args, Debug, Clone)]
pub struct PositionUpdateArgs {
    /// Position id
    #[arg(value_parser = validate_record_id)]
    pub id: String,

    /// New title
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// New code
    #[arg(short, long)]
    pub code: Option<String>,

    /// New department
    #[arg(short, long)]
    pub department: Option<String>,

    /// New headcount
    #[arg(long)]
    pub headcount: Option<u32>,
}

// ========== org ==========

/// Arguments for the `org` command
#[derive(Parser, Debug, Clone)]
pub struct OrgArgs {
    /// Org chart action
    #[command(subcommand)]
    pub action: OrgAction,
}

/// Org chart subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum OrgAction {
    /// Print the org chart
    Tree(TreeArgs),

    /// Assign a manager (rejected if it would create a reporting loop)
    Assign {
        /// Employee being reassigned
        #[arg(value_parser = validate_record_id)]
        employee: String,

        /// New manager
        #[arg(value_parser = validate_record_id)]
        manager: String,
    },

    /// Remove an employee's manager
    Unassign {
        /// Employee id
        #[arg(value_parser = validate_record_id)]
        employee: String,
    },

    /// Report roots, dangling references and reporting loops
    Check,
}

/// Arguments for `org tree`
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Chart positions instead of employees
    #[arg(long)]
    pub positions: bool,

    /// Only the subtree under this id
    #[arg(long, value_parser = validate_record_id)]
    pub root: Option<String>,

    /// Expand this many levels below the top
    #[arg(long)]
    pub depth: Option<usize>,

    /// Write the chart to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ========== report ==========

/// Arguments for the `report` command
#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Collection to report on
    #[arg(short, long, value_enum, default_value = "employees")]
    pub source: SourceArg,

    /// Columns to include (comma-separated); all fields when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Row filter `field:operator:value`; repeat to AND several
    ///
    /// Operators: equals, contains, starts_with, greater_than, less_than.
    #[arg(short = 'w', long = "where", value_parser = parse_predicate)]
    pub predicates: Vec<Predicate>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Report title (text format)
    #[arg(long)]
    pub title: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ========== payroll ==========

/// Arguments for the `payroll` command
#[derive(Parser, Debug, Clone)]
pub struct PayrollArgs {
    /// Payroll action
    #[command(subcommand)]
    pub action: PayrollAction,
}

/// Payroll subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PayrollAction {
    /// Record a pay period for an employee
    Add(PayrollAddArgs),

    /// List payroll records
    List {
        /// Only records for this employee
        #[arg(short, long, value_parser = validate_record_id)]
        employee: Option<String>,
    },

    /// Render a payslip
    Slip {
        /// Payroll record id
        #[arg(value_parser = validate_record_id)]
        id: String,

        /// Write the payslip to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Arguments for `payroll add`
#[derive(Args, Debug, Clone)]
pub struct PayrollAddArgs {
    /// Employee paid
    #[arg(value_parser = validate_record_id)]
    pub employee: String,

    /// Pay period (YYYY-MM)
    #[arg(short, long, value_parser = validate_period)]
    pub period: String,

    /// Basic salary
    #[arg(short, long, value_parser = parse_amount)]
    pub basic: f64,

    /// Allowances
    #[arg(short, long, value_parser = parse_amount, default_value = "0")]
    pub allowances: f64,

    /// Deductions
    #[arg(short, long, value_parser = parse_amount, default_value = "0")]
    pub deductions: f64,

    /// Currency code
    #[arg(short, long, default_value = "USD")]
    pub currency: String,
}
