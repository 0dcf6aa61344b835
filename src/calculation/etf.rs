//! Trust fund (ETF) contribution calculation.

use rust_decimal::Decimal;

use super::round_money;
use crate::config::EtfRates;
use crate::models::AuditStep;

/// The result of calculating the employer ETF contribution.
#[derive(Debug, Clone)]
pub struct EtfResult {
    /// Employer contribution.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employer-paid ETF contribution on basic salary.
pub fn calculate_etf(basic_salary: Decimal, rates: &EtfRates, step_number: u32) -> EtfResult {
    let amount = round_money(basic_salary * rates.rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "etf_contribution".to_string(),
        rule_name: "ETF Contribution".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "rate": rates.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "etf_employer": amount.to_string()
        }),
        reasoning: format!(
            "ETF paid by employer: {} × {} = {}",
            basic_salary,
            rates.rate.normalize(),
            amount
        ),
    };

    EtfResult { amount, audit_step }
}
