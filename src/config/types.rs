//! Configuration types for statutory payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayrollPeriod};

/// Metadata about the statutory scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// Short code identifying the scheme (e.g., "LK-STATUTORY").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version of the configured rates.
    pub version: String,
    /// URL to the official documentation.
    pub source_url: String,
    /// ISO currency code used when formatting amounts.
    pub currency: String,
}

/// Provident fund contribution rates, applied to basic salary.
#[derive(Debug, Clone, Deserialize)]
pub struct EpfRates {
    /// Employee share (e.g., 0.08).
    pub employee_rate: Decimal,
    /// Employer share (e.g., 0.12).
    pub employer_rate: Decimal,
}

/// Trust fund contribution rate, applied to basic salary.
#[derive(Debug, Clone, Deserialize)]
pub struct EtfRates {
    /// Employer contribution rate (e.g., 0.03).
    pub rate: Decimal,
}

/// Fixed stamp fee charged on salaries above a threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct StampFeeConfig {
    /// The fee amount.
    pub amount: Decimal,
    /// Gross salaries strictly above this amount attract the fee.
    pub threshold: Decimal,
}

/// One band of a progressive tax table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the band (inclusive). `None` for the open top band.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate for income falling in this band.
    pub rate: Decimal,
}

/// A monthly progressive APIT table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApitTable {
    /// Bands in ascending order; the last one must be open.
    pub brackets: Vec<TaxBracket>,
}

impl ApitTable {
    /// Checks that bands ascend, rates are in `[0, 1)` and only the last band is open.
    pub fn validate(&self, source: &str) -> PayrollResult<()> {
        let invalid = |message: String| PayrollError::ConfigParseError {
            path: source.to_string(),
            message,
        };

        let Some(last) = self.brackets.last() else {
            return Err(invalid("APIT table has no brackets".to_string()));
        };
        if last.up_to.is_some() {
            return Err(invalid("last APIT bracket must not have an upper bound".to_string()));
        }

        let mut previous = Decimal::ZERO;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(invalid(format!(
                    "APIT bracket {} rate {} must be in [0, 1)",
                    index, bracket.rate
                )));
            }
            match bracket.up_to {
                Some(bound) if bound <= previous => {
                    return Err(invalid(format!(
                        "APIT bracket {} upper bound {} must exceed {}",
                        index, bound, previous
                    )));
                }
                Some(bound) => previous = bound,
                None if index + 1 != self.brackets.len() => {
                    return Err(invalid(format!(
                        "APIT bracket {} is open but is not the last bracket",
                        index
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Statutory rates in force from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSet {
    /// The date from which these rates apply.
    pub effective_date: NaiveDate,
    /// Provident fund rates.
    pub epf: EpfRates,
    /// Trust fund rate.
    pub etf: EtfRates,
    /// Stamp fee.
    pub stamp_fee: StampFeeConfig,
    /// Monthly APIT table.
    pub apit: ApitTable,
}

/// Employee seed file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesFile {
    /// Employees to load into the directory.
    pub employees: Vec<Employee>,
}

/// The complete statutory configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Rate sets by effective date (sorted oldest first).
    rates: Vec<RateSet>,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(metadata: SchemeMetadata, rates: Vec<RateSet>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rates: sorted_rates,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns all rate sets, oldest first.
    pub fn rates(&self) -> &[RateSet] {
        &self.rates
    }

    /// Returns the rate set in force on the first day of `period`.
    pub fn rates_for(&self, period: PayrollPeriod) -> PayrollResult<&RateSet> {
        let date = period.first_day();
        self.rates
            .iter()
            .rfind(|r| r.effective_date <= date)
            .ok_or(PayrollError::RateNotFound {
                month: period.month(),
                year: period.year(),
            })
    }
}
