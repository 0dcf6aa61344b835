//! Payroll page model: the record list and the creation form.
//!
//! Nothing here depends on a UI toolkit. The form talks to the backend
//! through [`PayrollApi`](crate::client::PayrollApi).

mod list;
mod payroll_form;

pub use list::{
    CURRENCY_CODE, EMPTY_STATE_MESSAGE, PayrollListView, PayrollRow, StatusIndicator,
    format_currency, format_period,
};
pub use payroll_form::{CalculationTicket, PayrollDraft, PayrollForm};
