//! Server settings read from the environment.

use std::env;
use std::net::SocketAddr;

use crate::error::{PayrollError, PayrollResult};

/// Default bind address for the HTTP service.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default statutory configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = "./config/statutory";

/// Default employee seed file.
pub const DEFAULT_EMPLOYEES_FILE: &str = "./config/employees.yaml";

/// Runtime settings for the payroll service binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Directory holding `scheme.yaml` and `rates/`.
    pub config_dir: String,
    /// Employee seed file.
    pub employees_file: String,
}

impl ServerSettings {
    /// Reads settings from the environment, loading `.env` first if present.
    ///
    /// Recognised variables: `PAYROLL_BIND_ADDR`, `PAYROLL_CONFIG_DIR`,
    /// `PAYROLL_EMPLOYEES_FILE`.
    pub fn from_env() -> PayrollResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> PayrollResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr_raw =
            lookup("PAYROLL_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse()
            .map_err(|e| PayrollError::ConfigParseError {
                path: "PAYROLL_BIND_ADDR".to_string(),
                message: format!("'{}': {}", bind_addr_raw, e),
            })?;

        Ok(Self {
            bind_addr,
            config_dir: lookup("PAYROLL_CONFIG_DIR")
                .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string()),
            employees_file: lookup("PAYROLL_EMPLOYEES_FILE")
                .unwrap_or_else(|| DEFAULT_EMPLOYEES_FILE.to_string()),
        })
    }
}
