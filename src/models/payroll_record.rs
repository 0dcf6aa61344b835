//! Payroll record models.
//!
//! A [`PayrollRecord`] is a persisted, finalized payroll entry. It is created
//! from a [`NewPayrollRecord`], which merges the payroll form's draft fields
//! with the most recent [`CalculationBreakdown`].

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BreakdownFigures, CalculationBreakdown, Figures, TaxScenario};

/// Lifecycle status of a payroll record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    /// Prepared but not yet approved.
    #[default]
    Draft,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Paid,
}

impl PayrollStatus {
    /// The wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Approved => "approved",
            PayrollStatus::Paid => "paid",
        }
    }

    /// Parses a wire name, returning `None` for values outside the known set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "draft" => Some(PayrollStatus::Draft),
            "approved" => Some(PayrollStatus::Approved),
            "paid" => Some(PayrollStatus::Paid),
            _ => None,
        }
    }

    /// Returns true if a record in this status may move to `next`.
    ///
    /// Allowed: draft -> approved, approved -> paid, approved -> draft.
    /// Paid is terminal. Staying in the same status is a no-op and allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollStatus;
    ///
    /// assert!(PayrollStatus::Draft.can_transition_to(PayrollStatus::Approved));
    /// assert!(!PayrollStatus::Draft.can_transition_to(PayrollStatus::Paid));
    /// assert!(!PayrollStatus::Paid.can_transition_to(PayrollStatus::Draft));
    /// ```
    pub fn can_transition_to(&self, next: PayrollStatus) -> bool {
        use PayrollStatus::*;
        matches!(
            (self, next),
            (Draft, Draft)
                | (Draft, Approved)
                | (Approved, Approved)
                | (Approved, Paid)
                | (Approved, Draft)
                | (Paid, Paid)
        )
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a store sequence number as a payroll serial number.
pub fn format_serial_number(sequence: u64) -> String {
    format!("PAY-{:06}", sequence)
}

/// The body of a payroll creation request: draft fields merged with the
/// last breakdown received from the calculation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayrollRecord {
    /// The employee being paid.
    pub employee_id: String,
    /// The payroll month (1-12).
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Basic salary as entered on the form.
    pub basic_salary: Decimal,
    /// Allowances as entered on the form.
    pub allowances: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Initial lifecycle status.
    #[serde(default)]
    pub status: PayrollStatus,
    /// Gross salary from the breakdown.
    pub gross_salary: Decimal,
    /// Employee EPF share from the breakdown.
    pub epf_employee: Decimal,
    /// Employer EPF share from the breakdown.
    pub epf_employer: Decimal,
    /// Employer ETF contribution from the breakdown.
    pub etf_employer: Decimal,
    /// Employee-borne APIT from the breakdown.
    pub apit_employee: Decimal,
    /// Employer-borne APIT from the breakdown.
    pub apit_employer: Decimal,
    /// Stamp fee from the breakdown.
    pub stamp_fee: Decimal,
    /// Total deductions from the breakdown.
    pub total_deductions: Decimal,
    /// Net salary from the breakdown.
    pub net_salary: Decimal,
    /// Total cost-to-company from the breakdown.
    pub total_ctc: Decimal,
    /// APIT scenario from the breakdown.
    pub scenario: TaxScenario,
}

/// Draft fields owned by the payroll form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftFields {
    /// The employee being paid.
    pub employee_id: String,
    /// The payroll month (1-12).
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Basic salary as entered.
    pub basic_salary: Decimal,
    /// Allowances as entered.
    pub allowances: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Initial lifecycle status.
    pub status: PayrollStatus,
}

impl NewPayrollRecord {
    /// Merges draft fields with a breakdown. Monetary results are copied
    /// from the breakdown verbatim.
    pub fn merge(draft: DraftFields, breakdown: &CalculationBreakdown) -> Self {
        Self {
            employee_id: draft.employee_id,
            month: draft.month,
            year: draft.year,
            basic_salary: draft.basic_salary,
            allowances: draft.allowances,
            notes: draft.notes,
            status: draft.status,
            gross_salary: breakdown.gross_salary,
            epf_employee: breakdown.epf_employee,
            epf_employer: breakdown.epf_employer,
            etf_employer: breakdown.etf_employer,
            apit_employee: breakdown.apit_employee,
            apit_employer: breakdown.apit_employer,
            stamp_fee: breakdown.stamp_fee,
            total_deductions: breakdown.total_deductions,
            net_salary: breakdown.net_salary,
            total_ctc: breakdown.total_ctc,
            scenario: breakdown.scenario,
        }
    }
}

impl BreakdownFigures for NewPayrollRecord {
    fn figures(&self) -> Figures {
        Figures {
            gross_salary: self.gross_salary,
            epf_employee: self.epf_employee,
            epf_employer: self.epf_employer,
            etf_employer: self.etf_employer,
            apit_employee: self.apit_employee,
            apit_employer: self.apit_employer,
            stamp_fee: self.stamp_fee,
            total_deductions: self.total_deductions,
            net_salary: self.net_salary,
            total_ctc: self.total_ctc,
            scenario: self.scenario,
        }
    }
}

/// A persisted payroll entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Sequential serial number, e.g. "PAY-000042".
    pub serial_number: String,
    /// The employee paid.
    pub employee_id: String,
    /// The payroll month (1-12).
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Allowances.
    pub allowances: Decimal,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Employee EPF share.
    pub epf_employee: Decimal,
    /// Employer EPF share.
    pub epf_employer: Decimal,
    /// Employer ETF contribution.
    pub etf_employer: Decimal,
    /// Employee-borne APIT.
    pub apit_employee: Decimal,
    /// Employer-side statutory tax, present when the employer bears APIT.
    pub employer_tax: Option<Decimal>,
    /// Stamp fee.
    pub stamp_fee: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net salary.
    pub net_salary: Decimal,
    /// Total cost-to-company.
    pub total_ctc: Decimal,
    /// APIT scenario.
    pub scenario: TaxScenario,
    /// Lifecycle status.
    pub status: PayrollStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds a record from a creation request.
    pub fn from_new(new: NewPayrollRecord, sequence: u64, now: DateTime<Utc>) -> Self {
        let employer_tax = match new.scenario {
            TaxScenario::EmployerBorne => Some(new.apit_employer),
            TaxScenario::EmployeeBorne => None,
        };
        Self {
            id: Uuid::new_v4(),
            serial_number: format_serial_number(sequence),
            employee_id: new.employee_id,
            month: new.month,
            year: new.year,
            basic_salary: new.basic_salary,
            allowances: new.allowances,
            gross_salary: new.gross_salary,
            epf_employee: new.epf_employee,
            epf_employer: new.epf_employer,
            etf_employer: new.etf_employer,
            apit_employee: new.apit_employee,
            employer_tax,
            stamp_fee: new.stamp_fee,
            total_deductions: new.total_deductions,
            net_salary: new.net_salary,
            total_ctc: new.total_ctc,
            scenario: new.scenario,
            status: new.status,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A payroll record joined with the employee's display fields, as served by
/// the list endpoint.
///
/// `status` is kept as the raw wire string so that list consumers tolerate
/// values they do not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollListEntry {
    /// Record identifier.
    pub id: Uuid,
    /// Record serial number.
    pub serial_number: String,
    /// The employee paid.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee code.
    pub employee_code: String,
    /// The payroll month (1-12).
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Net salary.
    pub net_salary: Decimal,
    /// Total cost-to-company.
    pub total_ctc: Decimal,
    /// Employer-side statutory tax, if any.
    #[serde(default)]
    pub employer_tax: Option<Decimal>,
    /// Lifecycle status as sent on the wire.
    pub status: String,
}

impl PayrollListEntry {
    /// Joins a record with its employee's display fields.
    pub fn new(record: &PayrollRecord, employee_name: &str, employee_code: &str) -> Self {
        Self {
            id: record.id,
            serial_number: record.serial_number.clone(),
            employee_id: record.employee_id.clone(),
            employee_name: employee_name.to_string(),
            employee_code: employee_code.to_string(),
            month: record.month,
            year: record.year,
            gross_salary: record.gross_salary,
            net_salary: record.net_salary,
            total_ctc: record.total_ctc,
            employer_tax: record.employer_tax,
            status: record.status.as_str().to_string(),
        }
    }
}

/// Body of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// The requested status.
    pub status: PayrollStatus,
}
