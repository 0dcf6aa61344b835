//! Statutory payroll engine.
//!
//! This crate calculates Sri Lankan statutory payroll (EPF, ETF, APIT and
//! stamp fee), stores payroll records, serves both over HTTP, and models
//! the payroll page that lists records and creates new ones.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod store;
