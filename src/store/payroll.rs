use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::PayrollStore;
use crate::calculation::check_amount;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{BreakdownFigures, NewPayrollRecord, PayrollPeriod, PayrollRecord, PayrollStatus};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<PayrollRecord>,
    last_sequence: u64,
}

/// Payroll records held in memory.
///
/// Serial numbers are assigned under the same write lock as the insert, so
/// they are unique and increase in creation order.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    inner: RwLock<Inner>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn validate(new: &NewPayrollRecord) -> PayrollResult<()> {
    PayrollPeriod::new(new.month, new.year)?;

    check_amount("basic_salary", new.basic_salary)?;
    check_amount("allowances", new.allowances)?;

    new.figures().verify()
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn create(&self, new: NewPayrollRecord) -> PayrollResult<PayrollRecord> {
        validate(&new)?;

        let mut inner = self.inner.write().await;
        let duplicate = inner.records.iter().any(|r| {
            r.employee_id == new.employee_id && r.month == new.month && r.year == new.year
        });
        if duplicate {
            return Err(PayrollError::DuplicatePayroll {
                employee_id: new.employee_id,
                month: new.month,
                year: new.year,
            });
        }

        inner.last_sequence += 1;
        let record = PayrollRecord::from_new(new, inner.last_sequence, Utc::now());
        inner.records.push(record.clone());

        debug!(
            record_id = %record.id,
            serial_number = %record.serial_number,
            "Payroll record stored"
        );
        Ok(record)
    }

    async fn list(&self) -> PayrollResult<Vec<PayrollRecord>> {
        Ok(self.inner.read().await.records.iter().rev().cloned().collect())
    }

    async fn get(&self, record_id: Uuid) -> PayrollResult<PayrollRecord> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| PayrollError::RecordNotFound {
                record_id: record_id.to_string(),
            })
    }

    async fn update_status(
        &self,
        record_id: Uuid,
        status: PayrollStatus,
    ) -> PayrollResult<PayrollRecord> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| PayrollError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        if !record.status.can_transition_to(status) {
            return Err(PayrollError::InvalidStatusTransition {
                from: record.status.to_string(),
                to: status.to_string(),
            });
        }

        if record.status != status {
            record.status = status;
            record.updated_at = Utc::now();
        }
        Ok(record.clone())
    }
}
