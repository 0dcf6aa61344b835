//! Monetary rounding and input limits.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PayrollError, PayrollResult};

/// Number of decimal places kept on every monetary output.
pub const MONEY_DP: u32 = 2;

/// Largest salary or allowance amount accepted, in rupees.
pub const MAX_AMOUNT_RUPEES: i64 = 1_000_000_000_000;

/// The largest accepted input amount as a `Decimal`.
pub fn max_amount() -> Decimal {
    Decimal::new(MAX_AMOUNT_RUPEES, 0)
}

/// Rejects an input amount that is negative or above [`max_amount`].
///
/// Keeping inputs under the cap leaves every sum and rate product in the
/// calculation well inside `Decimal` range.
pub fn check_amount(field: &str, value: Decimal) -> PayrollResult<Decimal> {
    if value < Decimal::ZERO || value > max_amount() {
        return Err(PayrollError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Rounds an amount to cents, half away from zero.
///
/// The result always carries exactly two decimal places, so `20000`
/// becomes `20000.00`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("58437.5625").unwrap()), Decimal::from_str("58437.56").unwrap());
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}
