//! In-process period lock store.
//!
//! Only suitable when a single process owns the ledger (tests, tools, local
//! runs). Multi-instance deployments need a shared store such as the
//! database repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::error::StoreError;
use super::store::{InsertOutcome, PeriodLockStore};
use super::types::{AccountingPeriod, MonthlyClose};

/// `DashMap`-backed lock store.
///
/// The entry API holds the shard lock across the existence check and the
/// insert, which makes `insert_if_absent` atomic.
#[derive(Debug, Default)]
pub struct InMemoryPeriodLockStore {
    records: DashMap<AccountingPeriod, MonthlyClose>,
}

impl InMemoryPeriodLockStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of closed periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no period has been closed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PeriodLockStore for InMemoryPeriodLockStore {
    async fn exists(&self, period: AccountingPeriod) -> Result<bool, StoreError> {
        Ok(self.records.contains_key(&period))
    }

    async fn insert_if_absent(&self, record: &MonthlyClose) -> Result<InsertOutcome, StoreError> {
        match self.records.entry(record.period) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn list(&self, year: Option<i32>) -> Result<Vec<MonthlyClose>, StoreError> {
        let mut records: Vec<MonthlyClose> = self
            .records
            .iter()
            .filter(|entry| year.is_none_or(|y| entry.key().year() == y))
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u32) -> MonthlyClose {
        MonthlyClose::new(AccountingPeriod::new(year, month).unwrap(), None)
    }

    #[tokio::test]
    async fn test_insert_if_absent_only_once() {
        let store = InMemoryPeriodLockStore::new();
        let first = record(2026, 2);

        assert_eq!(
            store.insert_if_absent(&first).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            store.insert_if_absent(&record(2026, 2)).await.unwrap(),
            InsertOutcome::AlreadyExists
        );
        assert_eq!(store.len(), 1);
        assert!(store.exists(first.period).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_is_exact_key() {
        let store = InMemoryPeriodLockStore::new();
        store.insert_if_absent(&record(2026, 2)).await.unwrap();

        let feb_2025 = AccountingPeriod::new(2025, 2).unwrap();
        let mar_2026 = AccountingPeriod::new(2026, 3).unwrap();
        assert!(!store.exists(feb_2025).await.unwrap());
        assert!(!store.exists(mar_2026).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let store = InMemoryPeriodLockStore::new();
        for (year, month) in [(2025, 11), (2026, 1), (2025, 12), (2026, 2)] {
            store.insert_if_absent(&record(year, month)).await.unwrap();
        }

        let all = store.list(None).await.unwrap();
        let keys: Vec<_> = all.iter().map(|r| r.period.to_string()).collect();
        assert_eq!(keys, vec!["2/2026", "1/2026", "12/2025", "11/2025"]);

        let only_2025 = store.list(Some(2025)).await.unwrap();
        assert_eq!(only_2025.len(), 2);
        assert!(only_2025.iter().all(|r| r.period.year() == 2025));
    }
}
