//! The record types the entity store can hold.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

use crate::domain::{
    validate_name, validate_period, Employee, EmployeeId, EntityKind, NewEmployee,
    NewPayrollRecord, NewPosition, PayrollId, PayrollRecord, Position, PositionId,
};
use crate::error::ValidationError;

/// A record type with an id, a creation payload and JSONL persistence.
pub trait Entity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Identifier type.
    type Id: Clone + Eq + Hash + fmt::Display + From<String> + AsRef<str> + Send + Sync;

    /// Creation payload.
    type New: Send + 'static;

    /// Which collection this is.
    const KIND: EntityKind;

    /// The record's id.
    fn id(&self) -> &Self::Id;

    /// Validate a creation payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate_new(new: &Self::New) -> Result<(), ValidationError>;

    /// Text the generated id is hashed from.
    fn id_seed(new: &Self::New) -> String;

    /// Build the stored record from a validated payload.
    fn from_new(id: Self::Id, new: Self::New, now: DateTime<Utc>) -> Self;

    /// Validate a record read back from a snapshot or produced by a patch.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn check(&self) -> Result<(), ValidationError>;

    /// Stamp the last-update time.
    fn touch(&mut self, now: DateTime<Utc>);
}

impl Entity for Employee {
    type Id = EmployeeId;
    type New = NewEmployee;
    const KIND: EntityKind = EntityKind::Employee;

    fn id(&self) -> &EmployeeId {
        &self.id
    }

    fn validate_new(new: &NewEmployee) -> Result<(), ValidationError> {
        new.validate()
    }

    fn id_seed(new: &NewEmployee) -> String {
        format!("{}|{}", new.name, new.job_title)
    }

    fn from_new(id: EmployeeId, new: NewEmployee, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.trim().to_string(),
            job_title: new.job_title.trim().to_string(),
            department: new.department.trim().to_string(),
            manager_id: new.manager_id,
            status: new.status,
            email: new.email.map(|e| e.trim().to_string()),
            position_id: new.position_id,
            hire_date: new.hire_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn check(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)?;
        validate_name("job_title", &self.job_title)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Entity for Position {
    type Id = PositionId;
    type New = NewPosition;
    const KIND: EntityKind = EntityKind::Position;

    fn id(&self) -> &PositionId {
        &self.id
    }

    fn validate_new(new: &NewPosition) -> Result<(), ValidationError> {
        new.validate()
    }

    fn id_seed(new: &NewPosition) -> String {
        format!("{}|{}", new.code, new.title)
    }

    fn from_new(id: PositionId, new: NewPosition, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title.trim().to_string(),
            code: new.code.trim().to_uppercase(),
            department: new.department.trim().to_string(),
            reports_to_position_id: new.reports_to_position_id,
            headcount: new.headcount,
            created_at: now,
            updated_at: now,
        }
    }

    fn check(&self) -> Result<(), ValidationError> {
        validate_name("title", &self.title)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Entity for PayrollRecord {
    type Id = PayrollId;
    type New = NewPayrollRecord;
    const KIND: EntityKind = EntityKind::Payroll;

    fn id(&self) -> &PayrollId {
        &self.id
    }

    fn validate_new(new: &NewPayrollRecord) -> Result<(), ValidationError> {
        new.validate()
    }

    fn id_seed(new: &NewPayrollRecord) -> String {
        format!("{}|{}", new.employee_id, new.period)
    }

    fn from_new(id: PayrollId, new: NewPayrollRecord, now: DateTime<Utc>) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            period: new.period.trim().to_string(),
            basic_salary: new.basic_salary,
            allowances: new.allowances,
            deductions: new.deductions,
            currency: new.currency.trim().to_uppercase(),
            created_at: now,
            updated_at: now,
        }
    }

    fn check(&self) -> Result<(), ValidationError> {
        validate_period(&self.period)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
