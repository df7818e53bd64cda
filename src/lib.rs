//! BETSLIP — fixed-odds match card with a simulated bet ledger
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod catalog;
pub mod engine;
pub mod notify;
pub mod dashboard;
