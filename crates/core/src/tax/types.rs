//! Tax breakdown record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thaibooks_shared::Money;

/// Every tax figure derived from a document's sub total.
///
/// Produced by [`TaxCalculator::tax_breakdown`](super::TaxCalculator::tax_breakdown).
/// Invariants:
/// - `grand_total == sub_total + vat_amount`
/// - `net_received == grand_total - wht_amount` when tax is withheld,
///   otherwise `net_received == grand_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Amount before VAT.
    pub sub_total: Money,
    /// VAT rate in percent.
    pub vat_rate: Decimal,
    /// VAT charged on the sub total.
    pub vat_amount: Money,
    /// Sub total plus VAT.
    pub grand_total: Money,
    /// Withholding rate in percent, zero when nothing is withheld.
    pub wht_rate: Decimal,
    /// Amount the withholding rate was applied to.
    pub wht_base: Money,
    /// Tax withheld by the payer.
    pub wht_amount: Money,
    /// What the vendor actually receives.
    pub net_received: Money,
}

impl TaxBreakdown {
    /// Returns true if any tax was withheld.
    #[must_use]
    pub fn has_withholding(&self) -> bool {
        !self.wht_amount.is_zero()
    }
}
