//! Payroll period model.
//!
//! Payroll runs monthly; a [`PayrollPeriod`] is a validated month/year pair.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};

use crate::error::{PayrollError, PayrollResult};

/// Earliest year accepted for a payroll period.
pub const MIN_PAYROLL_YEAR: i32 = 2000;

/// Latest year accepted for a payroll period.
pub const MAX_PAYROLL_YEAR: i32 = 2100;

/// A calendar month for which payroll is run.
///
/// Stored as the first day of the month, so a period always names a real
/// calendar date.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
///
/// let period = PayrollPeriod::new(1, 2026).unwrap();
/// assert_eq!(period.label(), "January 2026");
/// assert!(PayrollPeriod::new(13, 2026).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayrollPeriod {
    first_day: NaiveDate,
}

impl PayrollPeriod {
    /// Creates a validated payroll period.
    pub fn new(month: u32, year: i32) -> PayrollResult<Self> {
        if !(MIN_PAYROLL_YEAR..=MAX_PAYROLL_YEAR).contains(&year) {
            return Err(PayrollError::InvalidPeriod {
                month,
                year,
                message: format!(
                    "year must be between {} and {}",
                    MIN_PAYROLL_YEAR, MAX_PAYROLL_YEAR
                ),
            });
        }
        let first_day =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| PayrollError::InvalidPeriod {
                month,
                year,
                message: "month must be between 1 and 12".to_string(),
            })?;
        Ok(Self { first_day })
    }

    /// The payroll month (1-12).
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The payroll year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The first calendar day of the period, used for rate lookups.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// English month name, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        month_name(self.month())
    }

    /// Human-readable label, e.g. "March 2026".
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year())
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

/// Looks up the English name of a month number, or "Unknown" when out of range.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}
