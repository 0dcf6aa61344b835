use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use super::PayrollApi;
use crate::api::{ApiError, CalculateRequest};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    CalculationBreakdown, Employee, NewPayrollRecord, PayrollListEntry, PayrollRecord,
    PayrollStatus, StatusUpdate,
};

/// reqwest-backed client for the payroll API.
#[derive(Debug, Clone)]
pub struct HttpPayrollApi {
    client: Client,
    base_url: String,
}

impl HttpPayrollApi {
    /// Creates a client for the service at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PayrollResult<T> {
        let response = request.send().await.map_err(|e| PayrollError::Transport {
            message: format!("Request failed: {}", e),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Payroll API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(error) => PayrollError::Api {
                    status: status.as_u16(),
                    code: error.code,
                    message: error.message,
                },
                Err(_) => PayrollError::Api {
                    status: status.as_u16(),
                    code: "UNKNOWN".to_string(),
                    message: body,
                },
            });
        }

        response.json().await.map_err(|e| PayrollError::Transport {
            message: format!("Failed to parse response: {}", e),
        })
    }
}

#[async_trait]
impl PayrollApi for HttpPayrollApi {
    async fn list_employees(&self) -> PayrollResult<Vec<Employee>> {
        self.send(self.client.get(self.url("/employees"))).await
    }

    async fn list_payroll(&self) -> PayrollResult<Vec<PayrollListEntry>> {
        self.send(self.client.get(self.url("/payroll"))).await
    }

    async fn calculate(&self, request: &CalculateRequest) -> PayrollResult<CalculationBreakdown> {
        self.send(self.client.post(self.url("/payroll/calculate")).json(request))
            .await
    }

    async fn create_payroll(&self, record: &NewPayrollRecord) -> PayrollResult<PayrollRecord> {
        self.send(self.client.post(self.url("/payroll")).json(record))
            .await
    }

    async fn update_status(
        &self,
        record_id: Uuid,
        status: PayrollStatus,
    ) -> PayrollResult<PayrollRecord> {
        let url = self.url(&format!("/payroll/{}/status", record_id));
        self.send(self.client.patch(url).json(&StatusUpdate { status }))
            .await
    }
}
