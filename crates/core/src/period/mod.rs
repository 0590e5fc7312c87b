//! Accounting periods and the month-end close lock.
//!
//! This module provides:
//! - `AccountingPeriod` (year + month) and month date ranges
//! - `MonthlyClose` lock records
//! - The `PeriodLockStore` persistence seam and an in-memory store
//! - `PeriodLockGuard`, consulted before any dated ledger write

pub mod error;
pub mod guard;
pub mod memory;
pub mod store;
pub mod types;

pub use error::{PeriodError, StoreError};
pub use guard::PeriodLockGuard;
pub use memory::InMemoryPeriodLockStore;
pub use store::{InsertOutcome, PeriodLockStore};
pub use types::{AccountingPeriod, MonthlyClose, PeriodKey, month_date_range};
