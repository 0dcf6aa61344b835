//! APIT (advance personal income tax) calculation.
//!
//! APIT is computed on gross monthly salary from a progressive table. Who
//! bears it depends on the scenario:
//!
//! - **Employee-borne**: the tax on gross is withheld from the salary.
//! - **Employer-borne**: the employer pays the tax, and because that payment
//!   is itself a taxable benefit the liability is grossed up ("tax on tax"):
//!   the employer pays `T` where `T = tax(gross + T)`.

use rust_decimal::Decimal;

use super::round_money;
use crate::config::ApitTable;
use crate::models::{AuditStep, TaxScenario};

/// The result of calculating APIT, including the audit step.
#[derive(Debug, Clone)]
pub struct ApitResult {
    /// Tax withheld from the employee (employee-borne only).
    pub employee: Decimal,
    /// Tax paid by the employer (employer-borne only).
    pub employer: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Tax due on `income` under a progressive table, unrounded.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::progressive_tax;
/// use payroll_engine::config::{ApitTable, TaxBracket};
/// use rust_decimal::Decimal;
///
/// let table = ApitTable {
///     brackets: vec![
///         TaxBracket { up_to: Some(Decimal::new(100_000, 0)), rate: Decimal::ZERO },
///         TaxBracket { up_to: None, rate: Decimal::new(6, 2) },
///     ],
/// };
/// assert_eq!(progressive_tax(Decimal::new(120_000, 0), &table), Decimal::new(1200, 0));
/// ```
pub fn progressive_tax(income: Decimal, table: &ApitTable) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in &table.brackets {
        if income <= lower {
            break;
        }
        let top = match bracket.up_to {
            Some(upper) => income.min(upper),
            None => income,
        };
        tax += (top - lower) * bracket.rate;
        match bracket.up_to {
            Some(upper) => lower = upper,
            None => break,
        }
    }

    tax
}

/// Employer-borne tax `T` solving `T = tax(income + T)`, unrounded.
///
/// Inside a band starting at `lower` with cumulative tax `base` and rate `r`,
/// `T = base + r × (income + T - lower)`, so `T = (base + r × (income - lower)) / (1 - r)`.
/// The solution is the first band whose grossed-up income falls inside it.
pub fn grossed_up_tax(income: Decimal, table: &ApitTable) -> Decimal {
    let mut lower = Decimal::ZERO;
    let mut base = Decimal::ZERO;
    let mut candidate = Decimal::ZERO;

    for bracket in &table.brackets {
        let rate = bracket.rate;
        candidate = (base + rate * (income - lower)) / (Decimal::ONE - rate);
        let grossed = income + candidate;

        match bracket.up_to {
            Some(upper) if grossed <= upper => return candidate.max(Decimal::ZERO),
            Some(upper) => {
                base += (upper - lower) * rate;
                lower = upper;
            }
            None => return candidate.max(Decimal::ZERO),
        }
    }

    candidate.max(Decimal::ZERO)
}

/// Calculates APIT on a gross monthly salary for the given scenario.
pub fn calculate_apit(
    gross_salary: Decimal,
    table: &ApitTable,
    scenario: TaxScenario,
    step_number: u32,
) -> ApitResult {
    let (employee, employer, reasoning) = match scenario {
        TaxScenario::EmployeeBorne => {
            let tax = round_money(progressive_tax(gross_salary, table));
            (
                tax,
                Decimal::ZERO,
                format!(
                    "Employee-borne APIT on gross {}: {} withheld from salary",
                    gross_salary, tax
                ),
            )
        }
        TaxScenario::EmployerBorne => {
            let tax = round_money(grossed_up_tax(gross_salary, table));
            (
                Decimal::ZERO,
                tax,
                format!(
                    "Employer-borne APIT on gross {}: grossed-up tax {} paid by employer",
                    gross_salary, tax
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "apit".to_string(),
        rule_name: "APIT".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "scenario": scenario,
            "brackets": table.brackets.len()
        }),
        output: serde_json::json!({
            "apit_employee": employee.to_string(),
            "apit_employer": employer.to_string()
        }),
        reasoning,
    };

    ApitResult {
        employee,
        employer,
        audit_step,
    }
}
