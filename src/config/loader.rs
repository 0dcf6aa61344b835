//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! configurations and employee seed data from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayrollPeriod};

use super::types::{EmployeesFile, RateSet, SchemeMetadata, StatutoryConfig};

/// Loads and provides access to statutory configuration.
///
/// # Directory Structure
///
/// ```text
/// config/statutory/
/// ├── scheme.yaml          # Scheme metadata
/// └── rates/
///     ├── 2023-04-01.yaml  # Rates effective from this date
///     └── 2025-04-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayrollPeriod;
///
/// let loader = ConfigLoader::load("./config/statutory").unwrap();
/// let period = PayrollPeriod::new(1, 2026).unwrap();
/// let rates = loader.rates_for(period).unwrap();
/// println!("EPF employee rate: {}", rates.epf.employee_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if `scheme.yaml` or the `rates` directory is missing, if any
    /// file is not valid YAML, or if any APIT table is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let scheme_path = path.join("scheme.yaml");
        let metadata = load_yaml::<SchemeMetadata>(&scheme_path)?;

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        debug!(
            scheme = %metadata.code,
            rate_sets = rates.len(),
            "Loaded statutory configuration"
        );

        Ok(Self {
            config: StatutoryConfig::new(metadata, rates),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: StatutoryConfig) -> Self {
        Self { config }
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> PayrollResult<Vec<RateSet>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| PayrollError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();
        let mut sources: HashMap<NaiveDate, String> = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| PayrollError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let path_str = path.display().to_string();
                let rate_set = load_yaml::<RateSet>(&path)?;
                rate_set.apit.validate(&path_str)?;

                if let Some(existing) = sources.insert(rate_set.effective_date, path_str.clone()) {
                    return Err(PayrollError::ConfigParseError {
                        path: path_str,
                        message: format!(
                            "effective date {} is already defined in {}",
                            rate_set.effective_date, existing
                        ),
                    });
                }
                rates.push(rate_set);
            }
        }

        if rates.is_empty() {
            return Err(PayrollError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Loads the employee seed file.
    pub fn load_employees<P: AsRef<Path>>(path: P) -> PayrollResult<Vec<Employee>> {
        let path = path.as_ref();
        let file = load_yaml::<EmployeesFile>(path)?;

        for employee in &file.employees {
            for (field, value) in [
                ("basic_salary", employee.basic_salary),
                ("allowances", employee.allowances),
            ] {
                if value < Decimal::ZERO {
                    return Err(PayrollError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("employee '{}' has negative {}", employee.id, field),
                    });
                }
            }
        }

        Ok(file.employees)
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the rate set in force for a payroll period.
    pub fn rates_for(&self, period: PayrollPeriod) -> PayrollResult<&RateSet> {
        self.config.rates_for(period)
    }
}

/// Loads and parses a YAML file.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
