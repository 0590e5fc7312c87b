//! Month-end close guard.
//!
//! Every flow that writes a dated financial record (orders, expenses,
//! documents, payments) calls [`PeriodLockGuard::assert_open`] first and
//! aborts on `PeriodError::PeriodClosed`.
//!
//! The lifecycle per (year, month) is one-way: Open -> Closed. There is no
//! reopen operation.

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::{debug, info, warn};

use super::error::PeriodError;
use super::store::{InsertOutcome, PeriodLockStore};
use super::types::{AccountingPeriod, MonthlyClose};

/// Enforces the month-end close lock through a [`PeriodLockStore`].
///
/// Holds no state of its own: every check goes to the store, since another
/// process may close a month at any time.
#[derive(Debug, Clone)]
pub struct PeriodLockGuard<S> {
    store: S,
}

impl<S: PeriodLockStore> PeriodLockGuard<S> {
    /// Creates a guard over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns true if month `month` of `year` has been closed.
    pub async fn is_closed(&self, year: i32, month: u32) -> Result<bool, PeriodError> {
        let period = AccountingPeriod::new(year, month)?;
        self.is_period_closed(period).await
    }

    /// Returns true if `period` has been closed.
    pub async fn is_period_closed(&self, period: AccountingPeriod) -> Result<bool, PeriodError> {
        let closed = self.store.exists(period).await?;
        debug!(%period, closed, "checked period lock");
        Ok(closed)
    }

    /// Fails with `PeriodError::PeriodClosed` if the month containing `date`
    /// is closed.
    pub async fn assert_open(&self, date: NaiveDate) -> Result<(), PeriodError> {
        let period = AccountingPeriod::containing(date)?;
        if self.is_period_closed(period).await? {
            warn!(%period, %date, "rejected write into closed period");
            return Err(PeriodError::PeriodClosed {
                year: period.year(),
                month: period.month(),
            });
        }
        Ok(())
    }

    /// [`assert_open`](Self::assert_open) for a timestamp.
    ///
    /// The business date is taken in the timestamp's own zone, so convert
    /// to the accounting time zone first (e.g. `Asia/Bangkok`).
    pub async fn assert_open_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Result<(), PeriodError> {
        self.assert_open(at.date_naive()).await
    }

    /// Closes month `month` of `year`.
    ///
    /// Fails with `PeriodError::PeriodAlreadyClosed` if the month is already
    /// closed. Uniqueness is decided by the store's atomic insert, so of two
    /// racing closes exactly one succeeds.
    pub async fn close(
        &self,
        year: i32,
        month: u32,
        note: Option<String>,
    ) -> Result<MonthlyClose, PeriodError> {
        let period = AccountingPeriod::new(year, month)?;
        let record = MonthlyClose::new(period, note);

        match self.store.insert_if_absent(&record).await? {
            InsertOutcome::Inserted => {
                info!(%period, note = record.note.as_deref(), "closed accounting period");
                Ok(record)
            }
            InsertOutcome::AlreadyExists => {
                warn!(%period, "period already closed");
                Err(PeriodError::PeriodAlreadyClosed { year, month })
            }
        }
    }

    /// Lists closed periods, optionally for one year, newest first.
    pub async fn closed_periods(&self, year: Option<i32>) -> Result<Vec<MonthlyClose>, PeriodError> {
        Ok(self.store.list(year).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::period::memory::InMemoryPeriodLockStore;
    use crate::period::store::PeriodLockStore;
    use crate::period::error::StoreError;
    use async_trait::async_trait;
    use futures::future::join_all;
    use tokio::sync::Barrier;

    fn guard() -> PeriodLockGuard<InMemoryPeriodLockStore> {
        PeriodLockGuard::new(InMemoryPeriodLockStore::new())
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_period_lock_lifecycle() {
        let guard = guard();

        assert!(!guard.is_closed(2026, 2).await.unwrap());
        guard.assert_open(date(2026, 2, 15)).await.unwrap();

        let record = guard.close(2026, 2, None).await.unwrap();
        assert_eq!(record.period.key().year, 2026);
        assert_eq!(record.period.key().month, 2);

        assert!(guard.is_closed(2026, 2).await.unwrap());
        let err = guard.assert_open(date(2026, 2, 15)).await.unwrap_err();
        assert!(matches!(
            err,
            PeriodError::PeriodClosed {
                year: 2026,
                month: 2
            }
        ));

        let err = guard.close(2026, 2, None).await.unwrap_err();
        assert!(matches!(
            err,
            PeriodError::PeriodAlreadyClosed {
                year: 2026,
                month: 2
            }
        ));
    }

    #[tokio::test]
    async fn test_close_only_affects_its_month() {
        let guard = guard();
        guard.close(2026, 2, None).await.unwrap();

        guard.assert_open(date(2026, 1, 31)).await.unwrap();
        guard.assert_open(date(2026, 3, 1)).await.unwrap();
        guard.assert_open(date(2025, 2, 15)).await.unwrap();
        assert!(guard.assert_open(date(2026, 2, 1)).await.is_err());
        assert!(guard.assert_open(date(2026, 2, 28)).await.is_err());
    }

    #[tokio::test]
    async fn test_close_keeps_note() {
        let guard = guard();
        let record = guard
            .close(2026, 1, Some("VAT filed (PP.30)".to_string()))
            .await
            .unwrap();
        assert_eq!(record.note.as_deref(), Some("VAT filed (PP.30)"));

        let listed = guard.closed_periods(Some(2026)).await.unwrap();
        assert_eq!(listed, vec![record]);
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() {
        let guard = guard();
        assert!(matches!(
            guard.close(2026, 13, None).await,
            Err(PeriodError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            guard.is_closed(2026, 0).await,
            Err(PeriodError::InvalidPeriod { .. })
        ));
        assert!(guard.store().is_empty());
    }

    #[tokio::test]
    async fn test_assert_open_at_uses_local_date() {
        let guard = guard();
        guard.close(2026, 3, None).await.unwrap();

        // 2026-02-28 18:30 UTC is already 1 March in Bangkok
        let utc = chrono::Utc.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap();
        guard.assert_open_at(&utc).await.unwrap();

        let bangkok = utc.with_timezone(&chrono_tz::Asia::Bangkok);
        assert!(matches!(
            guard.assert_open_at(&bangkok).await,
            Err(PeriodError::PeriodClosed {
                year: 2026,
                month: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_is_closed_sees_writes_from_other_guards() {
        let store = Arc::new(InMemoryPeriodLockStore::new());
        let reader = PeriodLockGuard::new(Arc::clone(&store));
        let writer = PeriodLockGuard::new(Arc::clone(&store));

        assert!(!reader.is_closed(2026, 4).await.unwrap());
        writer.close(2026, 4, None).await.unwrap();
        assert!(reader.is_closed(2026, 4).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_close_exactly_one_wins() {
        let guard = Arc::new(guard());
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    guard.close(2026, 3, None).await
                })
            })
            .collect();

        let results: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(PeriodError::PeriodAlreadyClosed { year: 2026, month: 3 })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_many_concurrent_closes_single_record() {
        let guard = Arc::new(guard());
        let tasks = 32;
        let barrier = Arc::new(Barrier::new(tasks));

        let handles: Vec<_> = (0..tasks)
            .map(|i| {
                let guard = Arc::clone(&guard);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    guard.close(2026, 5, Some(format!("run {i}"))).await
                })
            })
            .collect();

        let successes = join_all(handles)
            .await
            .into_iter()
            .filter(|joined| matches!(joined, Ok(Ok(_))))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(guard.store().len(), 1);
    }

    /// Store that always fails, for error propagation.
    struct BrokenStore;

    #[async_trait]
    impl PeriodLockStore for BrokenStore {
        async fn exists(&self, _period: AccountingPeriod) -> Result<bool, StoreError> {
            Err(StoreError::new("connection refused"))
        }

        async fn insert_if_absent(
            &self,
            _record: &MonthlyClose,
        ) -> Result<InsertOutcome, StoreError> {
            Err(StoreError::new("connection refused"))
        }

        async fn list(&self, _year: Option<i32>) -> Result<Vec<MonthlyClose>, StoreError> {
            Err(StoreError::new("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let guard = PeriodLockGuard::new(BrokenStore);
        assert!(matches!(
            guard.assert_open(date(2026, 2, 1)).await,
            Err(PeriodError::Store(_))
        ));
        assert!(matches!(
            guard.close(2026, 2, None).await,
            Err(PeriodError::Store(_))
        ));
        assert!(matches!(
            guard.closed_periods(None).await,
            Err(PeriodError::Store(_))
        ));
    }
}
