//! Payroll creation form.
//!
//! The form keeps a local draft and the most recent breakdown returned by the
//! calculation service. Every breakdown request is stamped with a generation
//! number; a response is applied only if it belongs to the latest request,
//! so a slow response can never overwrite a newer one.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::list::PayrollListView;
use crate::api::CalculateRequest;
use crate::calculation::round_money;
use crate::client::PayrollApi;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    CalculationBreakdown, DraftFields, Employee, NewPayrollRecord, PayrollRecord, PayrollStatus,
};

/// Editable draft state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollDraft {
    /// Selected employee, if any.
    pub employee_id: Option<String>,
    /// Payroll month (1-12).
    pub month: u32,
    /// Payroll year.
    pub year: i32,
    /// Basic salary, seeded from the employee.
    pub basic_salary: Decimal,
    /// Allowances, seeded from the employee.
    pub allowances: Decimal,
    /// Free-text notes.
    pub notes: String,
    /// Status the record is created with.
    pub status: PayrollStatus,
}

impl PayrollDraft {
    /// An empty draft for the given period.
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            employee_id: None,
            month,
            year,
            basic_salary: Decimal::ZERO,
            allowances: Decimal::ZERO,
            notes: String::new(),
            status: PayrollStatus::Draft,
        }
    }

    fn calculate_request(&self) -> Option<CalculateRequest> {
        self.employee_id.as_ref().map(|employee_id| CalculateRequest {
            employee_id: employee_id.clone(),
            month: self.month,
            year: self.year,
            allowances: self.allowances,
        })
    }
}

/// A breakdown request that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationTicket {
    /// Generation the response must match to be applied.
    pub generation: u64,
    /// The request to send.
    pub request: CalculateRequest,
}

/// The payroll page: list of records plus the creation form.
pub struct PayrollForm<A> {
    api: A,
    employees: Vec<Employee>,
    list: PayrollListView,
    draft: PayrollDraft,
    breakdown: Option<CalculationBreakdown>,
    generation: u64,
    open: bool,
    last_error: Option<String>,
}

impl<A: PayrollApi> PayrollForm<A> {
    /// Creates a closed form defaulting to the current month.
    pub fn new(api: A) -> Self {
        let today = Utc::now().date_naive();
        Self::with_period(api, today.month(), today.year())
    }

    /// Creates a closed form defaulting to the given period.
    pub fn with_period(api: A, month: u32, year: i32) -> Self {
        Self {
            api,
            employees: Vec::new(),
            list: PayrollListView::default(),
            draft: PayrollDraft::new(month, year),
            breakdown: None,
            generation: 0,
            open: false,
            last_error: None,
        }
    }

    /// The backend this form talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Active employees available for selection.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// The rendered payroll list.
    pub fn list(&self) -> &PayrollListView {
        &self.list
    }

    /// The current draft.
    pub fn draft(&self) -> &PayrollDraft {
        &self.draft
    }

    /// The most recently applied breakdown.
    pub fn breakdown(&self) -> Option<&CalculationBreakdown> {
        self.breakdown.as_ref()
    }

    /// Whether the creation form is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Message of the last failed operation, cleared on the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The generation of the most recently issued breakdown request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetches employees (keeping active ones) and payroll records.
    pub async fn load(&mut self) -> PayrollResult<()> {
        let result = self.fetch().await;
        self.record(result)
    }

    async fn fetch(&mut self) -> PayrollResult<()> {
        let employees = self.api.list_employees().await?;
        self.employees = employees.into_iter().filter(Employee::is_active).collect();
        self.reload_list().await
    }

    async fn reload_list(&mut self) -> PayrollResult<()> {
        let entries = self.api.list_payroll().await?;
        self.list = PayrollListView::new(&entries);
        debug!(records = entries.len(), "Payroll list loaded");
        Ok(())
    }

    /// Opens the form with an empty draft, keeping the current period.
    pub fn open(&mut self) {
        self.reset();
        self.open = true;
    }

    /// Closes the form and discards the draft.
    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    fn reset(&mut self) {
        self.draft = PayrollDraft::new(self.draft.month, self.draft.year);
        self.breakdown = None;
        self.last_error = None;
        // Responses to requests issued before the reset must not land.
        self.generation += 1;
    }

    /// Selects an employee, seeds salary and allowances from their
    /// defaults, and requests a breakdown.
    pub async fn select_employee(&mut self, employee_id: &str) -> PayrollResult<()> {
        let employee = match self.employees.iter().find(|e| e.id == employee_id).cloned() {
            Some(employee) => employee,
            None => {
                return self.record(Err(PayrollError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                }));
            }
        };

        self.draft.employee_id = Some(employee.id);
        self.draft.basic_salary = employee.basic_salary;
        self.draft.allowances = employee.allowances;
        self.breakdown = None;
        self.recalculate().await
    }

    /// Sets allowances; a changed value triggers one breakdown request.
    pub async fn set_allowances(&mut self, allowances: Decimal) -> PayrollResult<()> {
        if self.draft.allowances == allowances {
            return Ok(());
        }
        self.draft.allowances = allowances;
        self.recalculate().await
    }

    /// Sets the month; a changed value triggers one breakdown request.
    pub async fn set_month(&mut self, month: u32) -> PayrollResult<()> {
        if self.draft.month == month {
            return Ok(());
        }
        self.draft.month = month;
        self.recalculate().await
    }

    /// Sets the year; a changed value triggers one breakdown request.
    pub async fn set_year(&mut self, year: i32) -> PayrollResult<()> {
        if self.draft.year == year {
            return Ok(());
        }
        self.draft.year = year;
        self.recalculate().await
    }

    /// Updates the draft basic salary. Does not recalculate.
    pub fn set_basic_salary(&mut self, basic_salary: Decimal) {
        self.draft.basic_salary = basic_salary;
    }

    /// Updates the draft notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// Updates the status the record is created with.
    pub fn set_status(&mut self, status: PayrollStatus) {
        self.draft.status = status;
    }

    /// Issues a new breakdown request for the current draft.
    ///
    /// Returns `None` when no employee is selected. Any ticket issued
    /// earlier becomes stale.
    pub fn begin_calculation(&mut self) -> Option<CalculationTicket> {
        let request = self.draft.calculate_request()?;
        self.generation += 1;
        Some(CalculationTicket {
            generation: self.generation,
            request,
        })
    }

    /// Applies a breakdown response.
    ///
    /// Returns `Ok(false)` and changes nothing when `generation` is not the
    /// latest issued. A failure for the latest request is recorded and
    /// returned, leaving the previous breakdown in place.
    pub fn apply_calculation(
        &mut self,
        generation: u64,
        result: PayrollResult<CalculationBreakdown>,
    ) -> PayrollResult<bool> {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale breakdown response"
            );
            return Ok(false);
        }

        let breakdown = self.record(result)?;
        self.breakdown = Some(breakdown);
        Ok(true)
    }

    async fn recalculate(&mut self) -> PayrollResult<()> {
        let Some(ticket) = self.begin_calculation() else {
            return Ok(());
        };
        let result = self.api.calculate(&ticket.request).await;
        self.apply_calculation(ticket.generation, result).map(|_| ())
    }

    /// Submits the draft merged with the last breakdown, closes the form and
    /// reloads the list.
    ///
    /// The breakdown figures are sent as received; nothing is recomputed
    /// locally.
    pub async fn submit(&mut self) -> PayrollResult<PayrollRecord> {
        let record = match self.merged_record() {
            Ok(record) => record,
            Err(err) => return self.record(Err(err)),
        };

        let created = self.api.create_payroll(&record).await;
        let created = self.record(created)?;

        self.close();
        let reloaded = self.reload_list().await;
        self.record(reloaded)?;
        Ok(created)
    }

    fn merged_record(&self) -> PayrollResult<NewPayrollRecord> {
        let Some(employee_id) = self.draft.employee_id.clone() else {
            return Err(PayrollError::IncompleteForm {
                message: "no employee selected".to_string(),
            });
        };
        let Some(breakdown) = self.breakdown.as_ref() else {
            return Err(PayrollError::IncompleteForm {
                message: "no calculation available".to_string(),
            });
        };
        if breakdown.employee_id != employee_id {
            return Err(PayrollError::IncompleteForm {
                message: "calculation belongs to a different employee".to_string(),
            });
        }
        if breakdown.month != self.draft.month || breakdown.year != self.draft.year {
            return Err(PayrollError::IncompleteForm {
                message: format!(
                    "calculation is for {}-{:02}, not the selected period",
                    breakdown.year, breakdown.month
                ),
            });
        }
        if breakdown.allowances != round_money(self.draft.allowances) {
            return Err(PayrollError::IncompleteForm {
                message: "calculation does not reflect the current allowances".to_string(),
            });
        }

        let notes = self.draft.notes.trim();
        let draft = DraftFields {
            employee_id,
            month: self.draft.month,
            year: self.draft.year,
            basic_salary: self.draft.basic_salary,
            allowances: self.draft.allowances,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            status: self.draft.status,
        };
        Ok(NewPayrollRecord::merge(draft, breakdown))
    }

    fn record<T>(&mut self, result: PayrollResult<T>) -> PayrollResult<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                warn!(error = %err, "Payroll form operation failed");
                self.last_error = Some(err.to_string());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::breakdown::tests::sample_breakdown;
    use crate::models::{EmployeeStatus, PayrollListEntry, TaxBearer};
    use async_trait::async_trait;
    use std::str::FromStr;
    use std::sync::Mutex;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, basic: &str, allowances: &str, status: EmployeeStatus) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            employee_code: id.to_uppercase(),
            basic_salary: dec(basic),
            allowances: dec(allowances),
            status,
            apit_bearer: TaxBearer::Employee,
        }
    }

    /// Records every call and answers from canned data.
    #[derive(Default)]
    struct RecordingApi {
        employees: Vec<Employee>,
        entries: Mutex<Vec<PayrollListEntry>>,
        calculations: Mutex<Vec<CalculateRequest>>,
        created: Mutex<Vec<NewPayrollRecord>>,
        fail_calculation: Mutex<bool>,
        list_calls: Mutex<u32>,
    }

    impl RecordingApi {
        fn new() -> Self {
            Self {
                employees: vec![
                    employee("emp_001", "150000.00", "20000.00", EmployeeStatus::Active),
                    employee("emp_004", "95000.00", "0.00", EmployeeStatus::Inactive),
                ],
                ..Default::default()
            }
        }

        fn calculation_count(&self) -> usize {
            self.calculations.lock().unwrap().len()
        }

        fn last_calculation(&self) -> CalculateRequest {
            self.calculations.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl PayrollApi for RecordingApi {
        async fn list_employees(&self) -> PayrollResult<Vec<Employee>> {
            Ok(self.employees.clone())
        }

        async fn list_payroll(&self) -> PayrollResult<Vec<PayrollListEntry>> {
            *self.list_calls.lock().unwrap() += 1;
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn calculate(
            &self,
            request: &CalculateRequest,
        ) -> PayrollResult<CalculationBreakdown> {
            self.calculations.lock().unwrap().push(request.clone());
            if *self.fail_calculation.lock().unwrap() {
                return Err(PayrollError::Api {
                    status: 400,
                    code: "INVALID_PERIOD".to_string(),
                    message: "month must be between 1 and 12".to_string(),
                });
            }
            let mut breakdown = sample_breakdown();
            breakdown.employee_id = request.employee_id.clone();
            breakdown.month = request.month;
            breakdown.year = request.year;
            breakdown.allowances = round_money(request.allowances);
            Ok(breakdown)
        }

        async fn create_payroll(&self, record: &NewPayrollRecord) -> PayrollResult<PayrollRecord> {
            self.created.lock().unwrap().push(record.clone());
            let stored = PayrollRecord::from_new(record.clone(), 1, Utc::now());
            let entry = PayrollListEntry::new(&stored, "Employee emp_001", "EMP_001");
            self.entries.lock().unwrap().push(entry);
            Ok(stored)
        }

        async fn update_status(
            &self,
            _record_id: Uuid,
            _status: PayrollStatus,
        ) -> PayrollResult<PayrollRecord> {
            Err(PayrollError::CalculationError {
                message: "not used".to_string(),
            })
        }
    }

    async fn loaded_form() -> PayrollForm<RecordingApi> {
        let mut form = PayrollForm::with_period(RecordingApi::new(), 1, 2026);
        form.load().await.unwrap();
        form.open();
        form
    }

    #[tokio::test]
    async fn test_load_keeps_only_active_employees() {
        let form = loaded_form().await;
        assert_eq!(form.employees().len(), 1);
        assert_eq!(form.employees()[0].id, "emp_001");
        assert_eq!(form.list().empty_message(), Some("No payroll records found"));
    }

    #[tokio::test]
    async fn test_select_employee_populates_defaults_and_calculates() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        assert_eq!(form.draft().basic_salary, dec("150000.00"));
        assert_eq!(form.draft().allowances, dec("20000.00"));
        assert_eq!(form.api().calculation_count(), 1);
        assert_eq!(form.api().last_calculation().allowances, dec("20000.00"));
        assert!(form.breakdown().is_some());
    }

    #[tokio::test]
    async fn test_select_unknown_or_inactive_employee_fails() {
        let mut form = loaded_form().await;
        assert!(matches!(
            form.select_employee("emp_004").await,
            Err(PayrollError::EmployeeNotFound { .. })
        ));
        assert!(form.last_error().is_some());
        assert_eq!(form.api().calculation_count(), 0);
    }

    #[tokio::test]
    async fn test_changing_allowances_requests_exactly_once() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        form.set_allowances(dec("25000")).await.unwrap();
        assert_eq!(form.api().calculation_count(), 2);
        assert_eq!(form.api().last_calculation().allowances, dec("25000"));

        form.set_allowances(dec("25000")).await.unwrap();
        assert_eq!(form.api().calculation_count(), 2);
    }

    #[tokio::test]
    async fn test_period_changes_recalculate() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        form.set_month(2).await.unwrap();
        form.set_year(2027).await.unwrap();
        form.set_month(2).await.unwrap();

        assert_eq!(form.api().calculation_count(), 3);
        let last = form.api().last_calculation();
        assert_eq!((last.month, last.year), (2, 2027));
    }

    #[tokio::test]
    async fn test_changes_without_employee_do_not_request() {
        let mut form = loaded_form().await;
        form.set_allowances(dec("1000")).await.unwrap();
        form.set_month(3).await.unwrap();
        assert_eq!(form.api().calculation_count(), 0);
    }

    #[tokio::test]
    async fn test_draft_only_setters_do_not_request() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        form.set_basic_salary(dec("155000"));
        form.set_notes("January run");
        form.set_status(PayrollStatus::Approved);

        assert_eq!(form.api().calculation_count(), 1);
        assert_eq!(form.draft().basic_salary, dec("155000"));
        assert_eq!(form.draft().status, PayrollStatus::Approved);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        let older = form.begin_calculation().unwrap();
        let newer = form.begin_calculation().unwrap();
        assert!(newer.generation > older.generation);

        let mut newest = sample_breakdown();
        newest.allowances = dec("30000.00");
        assert!(form.apply_calculation(newer.generation, Ok(newest)).unwrap());

        let mut stale = sample_breakdown();
        stale.allowances = dec("10000.00");
        assert!(!form.apply_calculation(older.generation, Ok(stale)).unwrap());

        assert_eq!(form.breakdown().unwrap().allowances, dec("30000.00"));
    }

    #[tokio::test]
    async fn test_stale_error_is_ignored() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        let older = form.begin_calculation().unwrap();
        let _newer = form.begin_calculation().unwrap();
        let stale = Err(PayrollError::Transport {
            message: "timeout".to_string(),
        });

        assert!(!form.apply_calculation(older.generation, stale).unwrap());
        assert!(form.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_calculation_keeps_previous_breakdown() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();
        let before = form.breakdown().cloned();

        *form.api().fail_calculation.lock().unwrap() = true;
        assert!(form.set_month(13).await.is_err());

        assert_eq!(form.breakdown().cloned(), before);
        assert!(form.last_error().unwrap().contains("INVALID_PERIOD"));
    }

    #[tokio::test]
    async fn test_submit_refuses_breakdown_for_previous_period() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        *form.api().fail_calculation.lock().unwrap() = true;
        assert!(form.set_month(2).await.is_err());
        assert_eq!(form.breakdown().unwrap().month, 1);

        match form.submit().await {
            Err(PayrollError::IncompleteForm { message }) => {
                assert!(message.contains("2026-01"));
            }
            other => panic!("Expected IncompleteForm, got {:?}", other),
        }
        assert!(form.api().created.lock().unwrap().is_empty());
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn test_submit_refuses_breakdown_for_previous_allowances() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();

        *form.api().fail_calculation.lock().unwrap() = true;
        assert!(form.set_allowances(dec("99999")).await.is_err());

        assert!(matches!(
            form.submit().await,
            Err(PayrollError::IncompleteForm { .. })
        ));
        assert!(form.api().created.lock().unwrap().is_empty());

        *form.api().fail_calculation.lock().unwrap() = false;
        form.set_allowances(dec("20000")).await.unwrap();
        form.set_allowances(dec("99999")).await.unwrap();
        let record = form.submit().await.unwrap();
        assert_eq!(record.allowances, dec("99999.00"));
    }

    #[tokio::test]
    async fn test_submit_sends_last_breakdown_verbatim() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();
        form.set_basic_salary(dec("1"));
        form.set_notes("  adjusted  ");

        let breakdown = form.breakdown().cloned().unwrap();
        form.submit().await.unwrap();

        let created = form.api().created.lock().unwrap().clone();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].net_salary, breakdown.net_salary);
        assert_eq!(created[0].gross_salary, breakdown.gross_salary);
        assert_eq!(created[0].total_ctc, breakdown.total_ctc);
        assert_eq!(created[0].basic_salary, dec("1"));
        assert_eq!(created[0].notes.as_deref(), Some("adjusted"));
    }

    #[tokio::test]
    async fn test_submit_closes_and_reloads() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();
        form.submit().await.unwrap();

        assert!(!form.is_open());
        assert!(form.breakdown().is_none());
        assert_eq!(form.draft().employee_id, None);
        assert_eq!(*form.api().list_calls.lock().unwrap(), 2);
        assert_eq!(form.list().rows().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_breakdown_is_incomplete() {
        let mut form = loaded_form().await;
        assert!(matches!(
            form.submit().await,
            Err(PayrollError::IncompleteForm { .. })
        ));
        assert!(form.is_open());
        assert!(form.api().created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_invalidates_outstanding_tickets() {
        let mut form = loaded_form().await;
        form.select_employee("emp_001").await.unwrap();
        let ticket = form.begin_calculation().unwrap();

        form.close();
        assert!(!form.apply_calculation(ticket.generation, Ok(sample_breakdown())).unwrap());
        assert!(form.breakdown().is_none());
    }
}
