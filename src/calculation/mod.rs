//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory calculation rules (EPF and ETF
//! contributions, stamp fee, employee- and employer-borne APIT) and the
//! breakdown calculation that combines them into net salary and
//! cost-to-company.

mod apit;
mod breakdown;
mod epf;
mod etf;
mod money;
mod stamp_fee;

pub use apit::{ApitResult, calculate_apit, grossed_up_tax, progressive_tax};
pub use breakdown::calculate_breakdown;
pub use epf::{EpfResult, calculate_epf};
pub use etf::{EtfResult, calculate_etf};
pub use money::{MAX_AMOUNT_RUPEES, MONEY_DP, check_amount, max_amount, round_money};
pub use stamp_fee::{StampFeeResult, calculate_stamp_fee};
