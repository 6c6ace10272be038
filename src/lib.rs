//! Hourly solar, battery and grid cost simulator with a multi-year projection.

pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
/// Diagnostic log and report export.
pub mod io;
pub mod load;
/// Dispatch engine, grid ledger and multi-year driver.
pub mod sim;
