//! Accounting period and lock record types.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// A calendar month used as the unit of month-end close.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PeriodKey", into = "PeriodKey")]
pub struct AccountingPeriod {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

/// Wire form of an [`AccountingPeriod`]: `{"year": 2026, "month": 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl AccountingPeriod {
    /// Creates the period for `month` (1-12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriod` if the month is outside 1-12 or
    /// the year is outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        let invalid = || PeriodError::InvalidPeriod { year, month };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last_day = next_month
            .and_then(|first_of_next| first_of_next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// The period containing `date`.
    ///
    /// # Errors
    ///
    /// Only fails for dates at the very edge of the supported calendar.
    pub fn containing(date: NaiveDate) -> Result<Self, PeriodError> {
        Self::new(date.year(), date.month())
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Month, 1-12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month (the 29th for a leap February).
    #[must_use]
    pub const fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Returns true if `date` falls within this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Inclusive `[first instant, last instant]` of the month in local time.
    ///
    /// The end is `23:59:59.999` on the last day so that reporting queries
    /// using `<=` do not drop records from the final day.
    #[must_use]
    pub fn date_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.first_day.and_time(NaiveTime::MIN),
            self.last_day.and_time(end_of_day()),
        )
    }

    /// Same as [`date_range`](Self::date_range), resolved in time zone `tz`.
    ///
    /// Returns `None` only if a boundary falls into a daylight-saving gap.
    #[must_use]
    pub fn date_range_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let (start, end) = self.date_range();
        let start = tz.from_local_datetime(&start).earliest()?;
        let end = tz.from_local_datetime(&end).latest()?;
        Some((start, end))
    }

    /// The wire key of this period.
    #[must_use]
    pub fn key(&self) -> PeriodKey {
        PeriodKey {
            year: self.year(),
            month: self.month(),
        }
    }
}

impl fmt::Display for AccountingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month(), self.year())
    }
}

impl TryFrom<PeriodKey> for AccountingPeriod {
    type Error = PeriodError;

    fn try_from(key: PeriodKey) -> Result<Self, Self::Error> {
        Self::new(key.year, key.month)
    }
}

impl From<AccountingPeriod> for PeriodKey {
    fn from(period: AccountingPeriod) -> Self {
        period.key()
    }
}

/// Inclusive `[first instant, last instant]` of a month, see
/// [`AccountingPeriod::date_range`].
///
/// # Errors
///
/// Returns `PeriodError::InvalidPeriod` for a month outside 1-12.
pub fn month_date_range(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime), PeriodError> {
    Ok(AccountingPeriod::new(year, month)?.date_range())
}

/// A month-end close lock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyClose {
    /// The closed period.
    pub period: AccountingPeriod,
    /// Optional free-text note entered by whoever closed the month.
    pub note: Option<String>,
    /// When the month was closed.
    pub closed_at: DateTime<Utc>,
}

impl MonthlyClose {
    /// Creates a lock record stamped with the current time.
    #[must_use]
    pub fn new(period: AccountingPeriod, note: Option<String>) -> Self {
        Self {
            period,
            note,
            closed_at: Utc::now(),
        }
    }
}

fn end_of_day() -> NaiveTime {
    // NaiveTime arithmetic wraps around midnight.
    NaiveTime::MIN - TimeDelta::milliseconds(1)
}
