//! Persistence seam for period lock records.

use async_trait::async_trait;

use super::error::StoreError;
use super::types::{AccountingPeriod, MonthlyClose};

/// Result of an insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was created.
    Inserted,
    /// A record for the same period already existed; nothing was written.
    AlreadyExists,
}

/// Storage for month-end close records, keyed by (year, month).
///
/// The store is the only source of truth. Implementations must not cache
/// across calls, and `insert_if_absent` must be atomic at the storage layer
/// (unique constraint or conditional write) so that concurrent closes of the
/// same period yield exactly one `Inserted`.
#[async_trait]
pub trait PeriodLockStore: Send + Sync {
    /// Returns true if a lock record exists for `period`.
    async fn exists(&self, period: AccountingPeriod) -> Result<bool, StoreError>;

    /// Inserts `record` unless one already exists for its period.
    async fn insert_if_absent(&self, record: &MonthlyClose) -> Result<InsertOutcome, StoreError>;

    /// Lists lock records, optionally restricted to one year, newest period
    /// first.
    async fn list(&self, year: Option<i32>) -> Result<Vec<MonthlyClose>, StoreError>;
}

#[async_trait]
impl<S: PeriodLockStore + ?Sized> PeriodLockStore for std::sync::Arc<S> {
    async fn exists(&self, period: AccountingPeriod) -> Result<bool, StoreError> {
        (**self).exists(period).await
    }

    async fn insert_if_absent(&self, record: &MonthlyClose) -> Result<InsertOutcome, StoreError> {
        (**self).insert_if_absent(record).await
    }

    async fn list(&self, year: Option<i32>) -> Result<Vec<MonthlyClose>, StoreError> {
        (**self).list(year).await
    }
}
