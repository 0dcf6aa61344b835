use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EmployeeDirectory;
use crate::error::{PayrollError, PayrollResult};
use crate::models::Employee;

/// Employee directory held in memory, seeded at startup.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates a directory holding `employees`.
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: RwLock::new(employees),
        }
    }

    /// Adds or replaces an employee by id.
    pub async fn upsert(&self, employee: Employee) {
        let mut employees = self.employees.write().await;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn list(&self) -> PayrollResult<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn get(&self, employee_id: &str) -> PayrollResult<Employee> {
        self.employees
            .read()
            .await
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
            .ok_or_else(|| PayrollError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}
