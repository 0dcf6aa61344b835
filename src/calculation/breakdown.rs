//! Full statutory breakdown for one employee and one month.
//!
//! Applies the EPF, ETF, stamp fee and APIT rules in order and assembles the
//! totals. The invariants checked by [`CalculationBreakdown::verify`] hold by
//! construction: totals are summed from the already-rounded components.

use std::time::Instant;

use rust_decimal::Decimal;

use super::{
    calculate_apit, calculate_epf, calculate_etf, calculate_stamp_fee, check_amount, round_money,
};
use crate::config::RateSet;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    AuditStep, AuditTrace, CalculationBreakdown, Employee, PayrollPeriod, TaxScenario,
};

/// Calculates the statutory breakdown for `employee` in `period`.
///
/// Basic salary is taken from the employee's stored default; `allowances`
/// is supplied by the caller. The APIT scenario follows the employee's
/// configured tax bearer.
///
/// # Errors
///
/// - `EmployeeInactive` if the employee is not active
/// - `InvalidAmount` if the basic salary or allowances are negative or
///   above [`max_amount`](super::max_amount)
pub fn calculate_breakdown(
    employee: &Employee,
    period: PayrollPeriod,
    allowances: Decimal,
    rates: &RateSet,
) -> PayrollResult<CalculationBreakdown> {
    let start_time = Instant::now();

    if !employee.is_active() {
        return Err(PayrollError::EmployeeInactive {
            employee_id: employee.id.clone(),
        });
    }
    let basic_salary = round_money(check_amount("basic_salary", employee.basic_salary)?);
    let allowances = round_money(check_amount("allowances", allowances)?);
    let gross_salary = basic_salary + allowances;
    let scenario = TaxScenario::from(employee.apit_bearer);

    let mut steps: Vec<AuditStep> = Vec::with_capacity(5);
    let mut step_number: u32 = 1;

    let epf = calculate_epf(basic_salary, &rates.epf, step_number);
    steps.push(epf.audit_step);
    step_number += 1;

    let etf = calculate_etf(basic_salary, &rates.etf, step_number);
    steps.push(etf.audit_step);
    step_number += 1;

    let stamp = calculate_stamp_fee(gross_salary, &rates.stamp_fee, step_number);
    steps.push(stamp.audit_step);
    step_number += 1;

    let apit = calculate_apit(gross_salary, &rates.apit, scenario, step_number);
    steps.push(apit.audit_step);
    step_number += 1;

    let total_deductions = epf.employee + apit.employee + stamp.amount;
    let net_salary = gross_salary - total_deductions;
    let total_ctc = gross_salary + epf.employer + etf.amount + apit.employer;

    steps.push(AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Totals".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "rates_effective_date": rates.effective_date.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_salary": net_salary.to_string(),
            "total_ctc": total_ctc.to_string()
        }),
        reasoning: format!(
            "Net {} = gross {} - deductions {}; CTC {} = gross + employer contributions",
            net_salary, gross_salary, total_deductions, total_ctc
        ),
    });

    Ok(CalculationBreakdown {
        employee_id: employee.id.clone(),
        month: period.month(),
        year: period.year(),
        basic_salary,
        allowances,
        gross_salary,
        epf_employee: epf.employee,
        epf_employer: epf.employer,
        etf_employer: etf.amount,
        apit_employee: apit.employee,
        apit_employer: apit.employer,
        stamp_fee: stamp.amount,
        total_deductions,
        net_salary,
        total_ctc,
        scenario,
        audit_trace: AuditTrace {
            steps,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
