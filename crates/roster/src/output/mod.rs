//! Output formatting for CLI commands.
//!
//! Every printer has a text form (colored unless disabled) and a JSON form
//! selected by `--json`.
//!
//! Submodules:
//! - [`color`]: semantic color helpers
//! - [`tree`]: org chart and structure-check rendering

pub mod color;
pub mod tree;

use serde::Serialize;
use std::env;
use std::io::{self, Write};

use crate::domain::{Employee, PayrollRecord, Position};

pub use color::{success, warning};
pub use tree::{print_org_tree, write_org_tree, write_structure_report};

use color::{bold, colorize_id, colorize_status, dimmed, status_icon};

/// Terminal output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// ASCII-only glyphs instead of Unicode.
    pub use_ascii: bool,
    /// ANSI colors.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Explicit settings.
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Settings from the environment.
    ///
    /// - `ROSTER_ASCII`: "1"/"true" for ASCII glyphs (default off)
    /// - `NO_COLOR`: any value disables colors
    /// - `ROSTER_COLOR`: "0"/"false" disables colors (default on)
    pub fn from_env() -> Self {
        let use_ascii = match env::var("ROSTER_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "ROSTER_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("ROSTER_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(false, true)
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,
    /// JSON for scripts.
    Json,
}

/// Print an employee list.
pub fn print_employees(employees: &[Employee], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_employees(&mut handle, employees, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &employees),
    }
}

/// Print an employee with manager and direct reports.
pub fn print_employee_details(
    employee: &Employee,
    manager: Option<&Employee>,
    reports: &[Employee],
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_employee_details(
            &mut handle,
            employee,
            manager,
            reports,
            &OutputConfig::from_env(),
        ),
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({
                "employee": employee,
                "manager": manager,
                "direct_reports": reports,
            }),
        ),
    }
}

/// Print a position list.
pub fn print_positions(positions: &[Position], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_positions(&mut handle, positions, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &positions),
    }
}

/// Print payroll records.
pub fn print_payroll(records: &[PayrollRecord], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_payroll(&mut handle, records, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &records),
    }
}

/// Print a plain message.
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn write_employee_line<W: Write>(
    w: &mut W,
    employee: &Employee,
    config: &OutputConfig,
) -> io::Result<()> {
    let mut line = format!(
        "{} {}  {}  {}",
        status_icon(employee.status, config),
        colorize_id(employee.id.as_str(), config),
        bold(&employee.name, config),
        employee.job_title
    );
    if !employee.department.is_empty() {
        line.push_str(&format!("  {}", dimmed(&employee.department, config)));
    }
    writeln!(w, "{line}")
}

fn write_employees<W: Write>(
    w: &mut W,
    employees: &[Employee],
    config: &OutputConfig,
) -> io::Result<()> {
    if employees.is_empty() {
        return writeln!(w, "No employees found.");
    }

    writeln!(w, "Found {} employee(s):", employees.len())?;
    writeln!(w)?;
    for employee in employees {
        write_employee_line(w, employee, config)?;
    }
    Ok(())
}

fn write_employee_details<W: Write>(
    w: &mut W,
    employee: &Employee,
    manager: Option<&Employee>,
    reports: &[Employee],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}: {}",
        status_icon(employee.status, config),
        colorize_id(employee.id.as_str(), config),
        bold(&employee.name, config)
    )?;
    writeln!(w, "{} {}", dimmed("Title:", config), employee.job_title)?;
    if !employee.department.is_empty() {
        writeln!(w, "{} {}", dimmed("Department:", config), employee.department)?;
    }
    writeln!(
        w,
        "{} {}",
        dimmed("Status:", config),
        colorize_status(employee.status, config)
    )?;
    if let Some(email) = &employee.email {
        writeln!(w, "{} {}", dimmed("Email:", config), email)?;
    }
    if let Some(position) = &employee.position_id {
        writeln!(w, "{} {}", dimmed("Position:", config), colorize_id(position.as_str(), config))?;
    }
    if let Some(hired) = employee.hire_date {
        writeln!(w, "{} {}", dimmed("Hired:", config), hired)?;
    }

    match (manager, &employee.manager_id) {
        (Some(m), _) => writeln!(
            w,
            "{} {} ({})",
            dimmed("Manager:", config),
            m.name,
            colorize_id(m.id.as_str(), config)
        )?,
        (None, Some(missing)) => writeln!(
            w,
            "{} {} (not on file)",
            dimmed("Manager:", config),
            colorize_id(missing.as_str(), config)
        )?,
        (None, None) => {}
    }

    writeln!(
        w,
        "{} {}    {} {}",
        dimmed("Created:", config),
        employee.created_at.format("%Y-%m-%d %H:%M"),
        dimmed("Updated:", config),
        employee.updated_at.format("%Y-%m-%d %H:%M")
    )?;

    if !reports.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Direct reports", config), reports.len())?;
        for report in reports {
            write!(w, "  ")?;
            write_employee_line(w, report, config)?;
        }
    }
    Ok(())
}

fn write_positions<W: Write>(
    w: &mut W,
    positions: &[Position],
    config: &OutputConfig,
) -> io::Result<()> {
    if positions.is_empty() {
        return writeln!(w, "No positions found.");
    }

    writeln!(w, "Found {} position(s):", positions.len())?;
    writeln!(w)?;
    for position in positions {
        writeln!(
            w,
            "{}  {}  {}  {}",
            colorize_id(position.id.as_str(), config),
            bold(&position.code, config),
            position.title,
            dimmed(&format!("x{}", position.headcount), config)
        )?;
    }
    Ok(())
}

fn write_payroll<W: Write>(
    w: &mut W,
    records: &[PayrollRecord],
    config: &OutputConfig,
) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(w, "No payroll records found.");
    }

    writeln!(w, "Found {} payroll record(s):", records.len())?;
    writeln!(w)?;
    for record in records {
        writeln!(
            w,
            "{}  {}  {}  {} {:.2}",
            colorize_id(record.id.as_str(), config),
            record.period,
            colorize_id(record.employee_id.as_str(), config),
            record.currency,
            record.net()
        )?;
    }
    Ok(())
}
