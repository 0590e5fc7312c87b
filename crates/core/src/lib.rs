//! Core business logic for Thaibooks.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the `PeriodLockStore` trait.
//!
//! # Modules
//!
//! - `tax` - VAT, withholding tax, and tax breakdowns
//! - `period` - Accounting periods and the month-end close lock
//! - `summary` - Monthly VAT position and P&L
//! - `numbering` - Running document numbers

pub mod numbering;
pub mod period;
pub mod summary;
pub mod tax;

pub use period::{PeriodError, PeriodLockGuard, PeriodLockStore};
pub use tax::{TaxBreakdown, TaxCalculator};
