//! Running document numbers.
//!
//! Format: `PREFIX-YYMM-NNNN`, e.g. `QT-2602-0001` or `INV-2602-0042`.
//! The sequence restarts every month. Looking up the last number issued
//! (and any prefix override from settings) is the caller's job.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thaibooks_shared::AppError;
use thiserror::Error;

/// Width of the zero-padded running number.
const SEQUENCE_WIDTH: usize = 4;

/// Errors raised while issuing document numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberingError {
    /// The running number of this month cannot be incremented any further.
    #[error("Running number for {month_prefix} is exhausted")]
    SequenceExhausted {
        /// `PREFIX-YYMM-` of the exhausted month.
        month_prefix: String,
    },
}

impl From<NumberingError> for AppError {
    fn from(err: NumberingError) -> Self {
        Self::BusinessRule(err.to_string())
    }
}

/// Kinds of numbered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    /// Quotation (ใบเสนอราคา).
    Quotation,
    /// Invoice (ใบแจ้งหนี้).
    Invoice,
    /// Tax invoice / receipt (ใบกำกับภาษี/ใบเสร็จรับเงิน).
    TaxInvoiceReceipt,
    /// Delivery note (ใบส่งของ).
    DeliveryNote,
    /// Sales order.
    Order,
    /// Service project.
    Project,
}

impl DocumentKind {
    /// Built-in prefix used when no override is configured.
    #[must_use]
    pub const fn default_prefix(self) -> &'static str {
        match self {
            Self::Quotation => "QT",
            Self::Invoice => "INV",
            Self::TaxInvoiceReceipt => "TX",
            Self::DeliveryNote => "DN",
            Self::Order => "ORD",
            Self::Project => "PRJ",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_prefix())
    }
}

/// `PREFIX-YYMM-` for the month containing `date`.
#[must_use]
pub fn month_prefix(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{prefix}-{:02}{:02}-",
        date.year().rem_euclid(100),
        date.month()
    )
}

/// Running number of an existing document number, if it has one.
#[must_use]
pub fn sequence_of(number: &str) -> Option<u64> {
    number.rsplit('-').next()?.parse().ok()
}

/// Next document number after `last` within the month of `date`.
///
/// `last` is the highest number already issued with the same month prefix.
/// A missing `last`, or one whose running number is not all digits, starts
/// the month at `0001`.
///
/// # Errors
///
/// Returns `NumberingError::SequenceExhausted` when the running number of
/// `last` cannot be incremented within `u64`. Issuing `0001` again would
/// duplicate an existing number.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use thaibooks_core::numbering::next_number;
///
/// let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
/// assert_eq!(next_number("QT", date, None).unwrap(), "QT-2602-0001");
/// assert_eq!(
///     next_number("QT", date, Some("QT-2602-0041")).unwrap(),
///     "QT-2602-0042"
/// );
/// ```
pub fn next_number(
    prefix: &str,
    date: NaiveDate,
    last: Option<&str>,
) -> Result<String, NumberingError> {
    let month_prefix = month_prefix(prefix, date);
    let running = last.and_then(|number| number.strip_prefix(month_prefix.as_str()));

    let next = match running {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .parse::<u64>()
            .ok()
            .and_then(|seq| seq.checked_add(1))
            .ok_or_else(|| NumberingError::SequenceExhausted {
                month_prefix: month_prefix.clone(),
            })?,
        _ => 1,
    };

    Ok(format!("{month_prefix}{next:0width$}", width = SEQUENCE_WIDTH))
}

/// [`next_number`] using the kind's built-in prefix.
pub fn next_document_number(
    kind: DocumentKind,
    date: NaiveDate,
    last: Option<&str>,
) -> Result<String, NumberingError> {
    next_number(kind.default_prefix(), date, last)
}
