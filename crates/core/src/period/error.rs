//! Period lock error types.

use thaibooks_shared::AppError;
use thiserror::Error;

/// Errors raised while checking or closing an accounting period.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// A mutation targeted a month that has already been closed.
    ///
    /// This is a hard business-rule violation: the caller must abort its
    /// write and must not retry.
    #[error("Accounting period {month}/{year} is closed; records dated in this month can no longer be changed")]
    PeriodClosed {
        /// Calendar year of the locked period.
        year: i32,
        /// Month of the locked period (1-12).
        month: u32,
    },

    /// A close was attempted on a month that is already closed.
    #[error("Accounting period {month}/{year} has already been closed")]
    PeriodAlreadyClosed {
        /// Calendar year of the period.
        year: i32,
        /// Month of the period (1-12).
        month: u32,
    },

    /// The (year, month) pair does not name a calendar month.
    #[error("Invalid accounting period: year {year}, month {month}")]
    InvalidPeriod {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// The lock store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reported by a [`PeriodLockStore`](super::PeriodLockStore) backend.
#[derive(Debug, Error)]
#[error("Period lock store error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps any displayable backend error.
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        match &err {
            PeriodError::PeriodClosed { .. } => Self::BusinessRule(err.to_string()),
            PeriodError::PeriodAlreadyClosed { .. } => Self::Conflict(err.to_string()),
            PeriodError::InvalidPeriod { .. } => Self::Validation(err.to_string()),
            PeriodError::Store(e) => Self::Database(e.0.clone()),
        }
    }
}
