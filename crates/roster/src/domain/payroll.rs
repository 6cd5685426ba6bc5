//! Payroll records backing payslip generation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EmployeeId, PayrollId};
use crate::error::ValidationError;

/// One pay period's figures for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier.
    pub id: PayrollId,
    /// Employee paid.
    pub employee_id: EmployeeId,
    /// Pay period, `YYYY-MM`.
    pub period: String,
    /// Base salary for the period.
    pub basic_salary: f64,
    /// Allowances added on top of the base.
    #[serde(default)]
    pub allowances: f64,
    /// Deductions (tax, benefits).
    #[serde(default)]
    pub deductions: f64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Basic salary plus allowances.
    pub fn gross(&self) -> f64 {
        self.basic_salary + self.allowances
    }

    /// Gross pay minus deductions.
    pub fn net(&self) -> f64 {
        self.gross() - self.deductions
    }
}

/// Data for creating a payroll record.
#[derive(Debug, Clone)]
pub struct NewPayrollRecord {
    /// Employee paid.
    pub employee_id: EmployeeId,
    /// Pay period, `YYYY-MM`.
    pub period: String,
    /// Base salary.
    pub basic_salary: f64,
    /// Allowances.
    pub allowances: f64,
    /// Deductions.
    pub deductions: f64,
    /// Currency code.
    pub currency: String,
}

impl NewPayrollRecord {
    /// Check period format, amounts and currency.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_period(&self.period)?;

        for (field, amount) in [
            ("basic_salary", self.basic_salary),
            ("allowances", self.allowances),
            ("deductions", self.deductions),
        ] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ValidationError::InvalidFormat {
                    field,
                    reason: format!("{amount} is not a non-negative amount"),
                });
            }
        }

        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidFormat {
                field: "currency",
                reason: format!("'{currency}' is not a three-letter currency code"),
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_period(period: &str) -> Result<(), ValidationError> {
    let period = period.trim();
    if period.is_empty() {
        return Err(ValidationError::Required { field: "period" });
    }
    // Periods are months; anchor on the first day to reuse the date parser.
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: "period",
            reason: format!("'{period}' is not in YYYY-MM form"),
        })
}
