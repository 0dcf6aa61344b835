//! Stamp fee calculation.
//!
//! A fixed fee is deducted from salaries whose gross exceeds a threshold.

use rust_decimal::Decimal;

use crate::config::StampFeeConfig;
use crate::models::AuditStep;

/// The result of applying the stamp fee rule.
#[derive(Debug, Clone)]
pub struct StampFeeResult {
    /// Fee deducted (zero when below the threshold).
    pub amount: Decimal,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Applies the stamp fee to a gross salary.
///
/// The fee applies only when `gross_salary` is strictly above the threshold.
pub fn calculate_stamp_fee(
    gross_salary: Decimal,
    config: &StampFeeConfig,
    step_number: u32,
) -> StampFeeResult {
    let applies = gross_salary > config.threshold;
    let amount = if applies { config.amount } else { Decimal::ZERO };

    let reasoning = if applies {
        format!(
            "Gross {} exceeds threshold {} - stamp fee {} applies",
            gross_salary, config.threshold, config.amount
        )
    } else {
        format!(
            "Gross {} does not exceed threshold {} - no stamp fee",
            gross_salary, config.threshold
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "stamp_fee".to_string(),
        rule_name: "Stamp Fee".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "threshold": config.threshold.to_string(),
            "fee": config.amount.to_string()
        }),
        output: serde_json::json!({
            "applies": applies,
            "stamp_fee": amount.to_string()
        }),
        reasoning,
    };

    StampFeeResult { amount, audit_step }
}
