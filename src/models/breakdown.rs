//! Calculation breakdown models.
//!
//! This module contains the [`CalculationBreakdown`] returned by the
//! calculation service and the audit trace recording how each figure was
//! derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBearer;
use crate::error::{PayrollError, PayrollResult};

/// Which statutory scenario applied to APIT.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{TaxBearer, TaxScenario};
///
/// assert_eq!(TaxScenario::from(TaxBearer::Employer), TaxScenario::EmployerBorne);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxScenario {
    /// APIT is withheld from the employee's salary.
    EmployeeBorne,
    /// APIT is paid by the employer and added to cost-to-company.
    EmployerBorne,
}

impl From<TaxBearer> for TaxScenario {
    fn from(bearer: TaxBearer) -> Self {
        match bearer {
            TaxBearer::Employee => TaxScenario::EmployeeBorne,
            TaxBearer::Employer => TaxScenario::EmployerBorne,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The statutory breakdown of one employee's salary for one month.
///
/// Produced by the calculation service; the payroll form never recomputes
/// any of these figures locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationBreakdown {
    /// The employee the breakdown is for.
    pub employee_id: String,
    /// The payroll month (1-12).
    pub month: u32,
    /// The payroll year.
    pub year: i32,
    /// Basic salary used for the calculation.
    pub basic_salary: Decimal,
    /// Allowances used for the calculation.
    pub allowances: Decimal,
    /// Basic salary plus allowances.
    pub gross_salary: Decimal,
    /// Employee share of the provident fund.
    pub epf_employee: Decimal,
    /// Employer share of the provident fund.
    pub epf_employer: Decimal,
    /// Employer trust-fund contribution.
    pub etf_employer: Decimal,
    /// APIT withheld from the employee (employee-borne scenario only).
    pub apit_employee: Decimal,
    /// APIT paid by the employer (employer-borne scenario only).
    pub apit_employer: Decimal,
    /// Fixed stamp fee deducted from the salary.
    pub stamp_fee: Decimal,
    /// Sum of all employee-side deductions.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions.
    pub net_salary: Decimal,
    /// Gross salary plus all employer-side contributions.
    pub total_ctc: Decimal,
    /// Which APIT scenario applied.
    pub scenario: TaxScenario,
    /// How the figures were derived.
    #[serde(default)]
    pub audit_trace: AuditTrace,
}

/// The figures of a breakdown that must hang together, wherever they travel.
///
/// Implemented by the breakdown itself and by records built from one, so the
/// same invariant check guards the service output and incoming submissions.
pub trait BreakdownFigures {
    /// Returns the amounts and scenario to check.
    fn figures(&self) -> Figures;
}

/// A flat view of breakdown amounts used for invariant checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figures {
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
    /// Employer-borne APIT.
    pub apit_employer: Decimal,
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
}

impl Figures {
    /// Checks the breakdown invariants.
    ///
    /// - net = gross - total deductions
    /// - total deductions = EPF employee + APIT employee + stamp fee
    /// - CTC = gross + EPF employer + ETF (+ APIT employer when employer-borne)
    /// - only the scenario's side of APIT may be non-zero
    /// - no amount is negative
    pub fn verify(&self) -> PayrollResult<()> {
        let amounts = [
            ("gross_salary", self.gross_salary),
            ("epf_employee", self.epf_employee),
            ("epf_employer", self.epf_employer),
            ("etf_employer", self.etf_employer),
            ("apit_employee", self.apit_employee),
            ("apit_employer", self.apit_employer),
            ("stamp_fee", self.stamp_fee),
            ("total_deductions", self.total_deductions),
            ("total_ctc", self.total_ctc),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(inconsistent(format!("{} must not be negative", field)));
        }

        let expected_deductions = checked_sum(
            "total_deductions",
            &[self.epf_employee, self.apit_employee, self.stamp_fee],
        )?;
        if self.total_deductions != expected_deductions {
            return Err(inconsistent(format!(
                "total_deductions {} does not equal EPF + APIT + stamp fee ({})",
                self.total_deductions, expected_deductions
            )));
        }

        let expected_net = self
            .gross_salary
            .checked_sub(self.total_deductions)
            .ok_or_else(|| inconsistent("net_salary is out of range".to_string()))?;
        if self.net_salary != expected_net {
            return Err(inconsistent(format!(
                "net_salary {} does not equal gross {} minus deductions {}",
                self.net_salary, self.gross_salary, self.total_deductions
            )));
        }

        match self.scenario {
            TaxScenario::EmployeeBorne if !self.apit_employer.is_zero() => {
                return Err(inconsistent(
                    "employer APIT must be zero when tax is employee-borne".to_string(),
                ));
            }
            TaxScenario::EmployerBorne if !self.apit_employee.is_zero() => {
                return Err(inconsistent(
                    "employee APIT must be zero when tax is employer-borne".to_string(),
                ));
            }
            _ => {}
        }

        let expected_ctc = checked_sum(
            "total_ctc",
            &[
                self.gross_salary,
                self.epf_employer,
                self.etf_employer,
                self.apit_employer,
            ],
        )?;
        if self.total_ctc != expected_ctc {
            return Err(inconsistent(format!(
                "total_ctc {} does not equal gross plus employer contributions ({})",
                self.total_ctc, expected_ctc
            )));
        }

        Ok(())
    }
}

fn inconsistent(message: String) -> PayrollError {
    PayrollError::InconsistentBreakdown { message }
}

fn checked_sum(field: &str, amounts: &[Decimal]) -> PayrollResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| inconsistent(format!("{} is out of range", field)))
}

impl BreakdownFigures for CalculationBreakdown {
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

impl CalculationBreakdown {
    /// Checks that the breakdown satisfies its invariants.
    pub fn verify(&self) -> PayrollResult<()> {
        self.figures().verify()
    }

    /// Employer-side tax, present only in the employer-borne scenario.
    pub fn employer_tax(&self) -> Option<Decimal> {
        match self.scenario {
            TaxScenario::EmployerBorne => Some(self.apit_employer),
            TaxScenario::EmployeeBorne => None,
        }
    }
}
