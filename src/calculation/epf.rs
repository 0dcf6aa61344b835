//! Provident fund (EPF) contribution calculation.
//!
//! Both the employee and the employer contribute a fixed share of the
//! employee's basic salary. Allowances are not EPF-liable.

use rust_decimal::Decimal;

use super::round_money;
use crate::config::EpfRates;
use crate::models::AuditStep;

/// The result of calculating EPF contributions, including the audit step.
#[derive(Debug, Clone)]
pub struct EpfResult {
    /// Employee share, deducted from salary.
    pub employee: Decimal,
    /// Employer share, added to cost-to-company.
    pub employer: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employee and employer EPF contributions on basic salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_epf;
/// use payroll_engine::config::EpfRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = EpfRates {
///     employee_rate: Decimal::from_str("0.08").unwrap(),
///     employer_rate: Decimal::from_str("0.12").unwrap(),
/// };
/// let result = calculate_epf(Decimal::from_str("150000").unwrap(), &rates, 1);
/// assert_eq!(result.employee, Decimal::from_str("12000.00").unwrap());
/// assert_eq!(result.employer, Decimal::from_str("18000.00").unwrap());
/// ```
pub fn calculate_epf(basic_salary: Decimal, rates: &EpfRates, step_number: u32) -> EpfResult {
    let employee = round_money(basic_salary * rates.employee_rate);
    let employer = round_money(basic_salary * rates.employer_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "epf_contribution".to_string(),
        rule_name: "EPF Contribution".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "employee_rate": rates.employee_rate.normalize().to_string(),
            "employer_rate": rates.employer_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "epf_employee": employee.to_string(),
            "epf_employer": employer.to_string()
        }),
        reasoning: format!(
            "EPF on basic salary {}: employee {} × {} = {}, employer {} × {} = {}",
            basic_salary,
            basic_salary,
            rates.employee_rate.normalize(),
            employee,
            basic_salary,
            rates.employer_rate.normalize(),
            employer
        ),
    };

    EpfResult {
        employee,
        employer,
        audit_step,
    }
}
