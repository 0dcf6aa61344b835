//! Configuration loading and management for the payroll engine.
//!
//! This module loads statutory rate configurations and employee seed data
//! from YAML files, and reads server settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/statutory").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod server;
mod types;

pub use loader::ConfigLoader;
pub use server::{DEFAULT_BIND_ADDR, DEFAULT_CONFIG_DIR, DEFAULT_EMPLOYEES_FILE, ServerSettings};
pub use types::{
    ApitTable, EmployeesFile, EpfRates, EtfRates, RateSet, SchemeMetadata, StampFeeConfig,
    StatutoryConfig, TaxBracket,
};
