//! Payroll list view model.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::calculation::round_money;
use crate::models::{PayrollListEntry, PayrollStatus, month_name};

/// Message shown when there are no payroll records.
pub const EMPTY_STATE_MESSAGE: &str = "No payroll records found";

/// Currency prefix for rendered amounts.
pub const CURRENCY_CODE: &str = "LKR";

/// Formats an amount as `LKR 1,234.56`.
///
/// # Example
///
/// ```
/// use payroll_engine::form::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "LKR 1,234.56");
/// assert_eq!(format_currency(Decimal::ZERO), "LKR 0.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_money(amount).to_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{} {}{}.{}", CURRENCY_CODE, sign, grouped, cents)
}

/// Formats a period as `January 2026`.
pub fn format_period(month: u32, year: i32) -> String {
    format!("{} {}", month_name(month), year)
}

/// Visual treatment of a record's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIndicator {
    /// Draft records.
    Warning,
    /// Approved records.
    Info,
    /// Paid records.
    Success,
    /// Anything else.
    Neutral,
}

impl StatusIndicator {
    /// Maps a wire status to its indicator. Unknown values are neutral.
    pub fn for_status(status: &str) -> Self {
        match PayrollStatus::parse(status) {
            Some(PayrollStatus::Draft) => Self::Warning,
            Some(PayrollStatus::Approved) => Self::Info,
            Some(PayrollStatus::Paid) => Self::Success,
            None => Self::Neutral,
        }
    }
}

/// One rendered row of the payroll list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRow {
    /// Record identifier.
    pub id: Uuid,
    /// Serial number, e.g. `PAY-000001`.
    pub serial_number: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee code.
    pub employee_code: String,
    /// Period label.
    pub period: String,
    /// Formatted gross salary.
    pub gross_salary: String,
    /// Formatted net salary.
    pub net_salary: String,
    /// Formatted cost-to-company.
    pub total_ctc: String,
    /// Formatted employer-side tax, when the employer bears it.
    pub employer_tax: Option<String>,
    /// Status as received.
    pub status: String,
    /// Status indicator.
    pub indicator: StatusIndicator,
}

impl From<&PayrollListEntry> for PayrollRow {
    fn from(entry: &PayrollListEntry) -> Self {
        Self {
            id: entry.id,
            serial_number: entry.serial_number.clone(),
            employee_name: entry.employee_name.clone(),
            employee_code: entry.employee_code.clone(),
            period: format_period(entry.month, entry.year),
            gross_salary: format_currency(entry.gross_salary),
            net_salary: format_currency(entry.net_salary),
            total_ctc: format_currency(entry.total_ctc),
            employer_tax: entry.employer_tax.map(format_currency),
            status: entry.status.clone(),
            indicator: StatusIndicator::for_status(&entry.status),
        }
    }
}

/// Rendered payroll list. No paging, filtering or sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollListView {
    rows: Vec<PayrollRow>,
}

impl PayrollListView {
    /// Renders the entries in the order received.
    pub fn new(entries: &[PayrollListEntry]) -> Self {
        Self {
            rows: entries.iter().map(PayrollRow::from).collect(),
        }
    }

    /// The rendered rows.
    pub fn rows(&self) -> &[PayrollRow] {
        &self.rows
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The empty-state message, shown only when there are no records.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_STATE_MESSAGE)
    }
}
