//! Payslip text export.

use chrono::{DateTime, Utc};

use crate::domain::{Employee, PayrollRecord};

const WIDTH: usize = 44;

/// Render a payslip for `record`.
///
/// `employee` is the paid employee when still on file; otherwise only the id
/// is shown.
pub fn render_payslip(
    company: &str,
    record: &PayrollRecord,
    employee: Option<&Employee>,
    generated_at: DateTime<Utc>,
) -> String {
    let heavy = "═".repeat(WIDTH);
    let light = "─".repeat(WIDTH);

    let employee_line = match employee {
        Some(e) => format!("{} ({})", e.name, e.id),
        None => record.employee_id.to_string(),
    };

    let mut lines = vec![
        heavy.clone(),
        format!("PAYSLIP  {company}"),
        heavy.clone(),
        field("Employee", &employee_line),
    ];
    if let Some(e) = employee {
        lines.push(field("Job Title", &e.job_title));
        if !e.department.is_empty() {
            lines.push(field("Department", &e.department));
        }
    }
    lines.extend([
        field("Period", &record.period),
        field("Currency", &record.currency),
        light,
        field("Basic Salary", &amount(record.basic_salary)),
        field("Allowances", &amount(record.allowances)),
        field("Gross Pay", &amount(record.gross())),
        field("Deductions", &amount(record.deductions)),
        field("Net Pay", &amount(record.net())),
        heavy,
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
    ]);

    lines.join("\n")
}

fn field(key: &str, value: &str) -> String {
    format!("{:<14}{value}", format!("{key}:"))
}

fn amount(value: f64) -> String {
    format!("{value:.2}")
}
