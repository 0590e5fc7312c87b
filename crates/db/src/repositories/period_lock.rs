//! Period lock repository for database operations.
//!
//! Implements `PeriodLockStore` on top of the `monthly_closes` table. The
//! insert never checks for an existing row first: it relies on the unique
//! index on (year, month) and maps the constraint violation to
//! `InsertOutcome::AlreadyExists`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use thaibooks_core::period::{
    AccountingPeriod, InsertOutcome, MonthlyClose, PeriodLockStore, StoreError,
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::entities::monthly_closes;

/// Period lock repository.
#[derive(Debug, Clone)]
pub struct PeriodLockRepository {
    db: DatabaseConnection,
}

impl PeriodLockRepository {
    /// Creates a new period lock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PeriodLockStore for PeriodLockRepository {
    async fn exists(&self, period: AccountingPeriod) -> Result<bool, StoreError> {
        let found = monthly_closes::Entity::find()
            .filter(monthly_closes::Column::Year.eq(period.year()))
            .filter(monthly_closes::Column::Month.eq(month_column(period)))
            .one(&self.db)
            .await
            .map_err(store_error)?;

        Ok(found.is_some())
    }

    async fn insert_if_absent(&self, record: &MonthlyClose) -> Result<InsertOutcome, StoreError> {
        let model = monthly_closes::ActiveModel {
            id: Set(Uuid::now_v7()),
            year: Set(record.period.year()),
            month: Set(month_column(record.period)),
            note: Set(record.note.clone()),
            closed_at: Set(record.closed_at.into()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => {
                debug!(id = %inserted.id, period = %record.period, "inserted monthly close");
                Ok(InsertOutcome::Inserted)
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(period = %record.period, "monthly close already present");
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(err) => Err(store_error(err)),
        }
    }

    async fn list(&self, year: Option<i32>) -> Result<Vec<MonthlyClose>, StoreError> {
        let mut query = monthly_closes::Entity::find();
        if let Some(year) = year {
            query = query.filter(monthly_closes::Column::Year.eq(year));
        }

        let models = query
            .order_by_desc(monthly_closes::Column::Year)
            .order_by_desc(monthly_closes::Column::Month)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        models.into_iter().map(to_record).collect()
    }
}

#[allow(clippy::cast_possible_wrap)]
fn month_column(period: AccountingPeriod) -> i32 {
    // always 1-12
    period.month() as i32
}

fn to_record(model: monthly_closes::Model) -> Result<MonthlyClose, StoreError> {
    let month = u32::try_from(model.month)
        .map_err(|_| StoreError(format!("invalid month {} in row {}", model.month, model.id)))?;
    let period = AccountingPeriod::new(model.year, month).map_err(StoreError::new)?;

    Ok(MonthlyClose {
        period,
        note: model.note,
        closed_at: model.closed_at.with_timezone(&Utc),
    })
}

fn store_error(err: sea_orm::DbErr) -> StoreError {
    error!(error = %err, "period lock query failed");
    StoreError::new(err)
}
