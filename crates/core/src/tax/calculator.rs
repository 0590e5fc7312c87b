//! VAT and withholding tax calculations.
//!
//! All functions funnel through [`round2`], the single rounding primitive
//! (midpoint away from zero, two decimal places). Rates are expressed in
//! percent units: `7` means 7%, not 0.07.
//!
//! None of the functions fail. A result that does not fit in a `Decimal`
//! saturates at `Decimal::MAX` / `Decimal::MIN` and is logged at `warn`.

use rust_decimal::Decimal;
use thaibooks_shared::config::TaxConfig;
use thaibooks_shared::types::money::{Money, round2};
use tracing::warn;

use super::types::TaxBreakdown;

/// Standard Thai VAT rate (7%).
pub const DEFAULT_VAT_RATE: Decimal = Decimal::from_parts(70, 0, 0, false, 1);

/// Withholding tax rate for services (3%).
pub const DEFAULT_WHT_SERVICE_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 1);

/// Tax calculator.
///
/// The associated functions take every rate explicitly and are fully pure.
/// An instance carries the organization's default rates (usually from
/// [`TaxConfig`]) for callers that do not pass a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxCalculator {
    vat_rate: Decimal,
    wht_rate: Decimal,
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_VAT_RATE, DEFAULT_WHT_SERVICE_RATE)
    }
}

impl TaxCalculator {
    /// Creates a calculator with the given default rates (percent).
    #[must_use]
    pub const fn new(vat_rate: Decimal, wht_rate: Decimal) -> Self {
        Self { vat_rate, wht_rate }
    }

    /// Creates a calculator from the configured default rates.
    #[must_use]
    pub fn from_config(config: &TaxConfig) -> Self {
        Self::new(config.vat_rate, config.wht_rate)
    }

    /// Default VAT rate of this calculator.
    #[must_use]
    pub const fn vat_rate(&self) -> Decimal {
        self.vat_rate
    }

    /// Default withholding tax rate of this calculator.
    #[must_use]
    pub const fn wht_rate(&self) -> Decimal {
        self.wht_rate
    }

    /// VAT on `sub_total` at the default rate.
    #[must_use]
    pub fn vat_for(&self, sub_total: Decimal) -> Money {
        Self::vat_amount(sub_total, self.vat_rate)
    }

    /// Grand total of `sub_total` at the default VAT rate.
    #[must_use]
    pub fn grand_total_for(&self, sub_total: Decimal) -> Money {
        Self::grand_total(sub_total, self.vat_rate)
    }

    /// Withholding tax on `base_amount` at the default WHT rate.
    #[must_use]
    pub fn wht_for(&self, base_amount: Decimal) -> Money {
        Self::wht_amount(base_amount, self.wht_rate)
    }

    /// Full breakdown at the default rates.
    ///
    /// Withholding is applied only when `wht_base` is given.
    #[must_use]
    pub fn breakdown_for(&self, sub_total: Decimal, wht_base: Option<Decimal>) -> TaxBreakdown {
        let wht_rate = wht_base.map(|_| self.wht_rate);
        Self::tax_breakdown(sub_total, self.vat_rate, wht_rate, wht_base)
    }

    /// Canonical rounding primitive, see [`round2`].
    #[must_use]
    pub fn round2(value: Decimal) -> Decimal {
        round2(value)
    }

    /// VAT amount: `round2(sub_total * vat_rate / 100)`.
    ///
    /// Negative sub totals are allowed and represent credit notes.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use thaibooks_core::tax::TaxCalculator;
    ///
    /// assert_eq!(TaxCalculator::vat_amount(dec!(100), dec!(7)).amount(), dec!(7.00));
    /// ```
    #[must_use]
    pub fn vat_amount(sub_total: Decimal, vat_rate: Decimal) -> Money {
        Money::new(apply_rate(sub_total, vat_rate, "vat_amount"))
    }

    /// Grand total: `round2(sub_total) + vat_amount(sub_total, vat_rate)`.
    ///
    /// The VAT component is rounded on its own before it is added.
    #[must_use]
    pub fn grand_total(sub_total: Decimal, vat_rate: Decimal) -> Money {
        Money::new(sub_total) + Self::vat_amount(sub_total, vat_rate)
    }

    /// Withholding tax: `round2(base_amount * wht_rate / 100)`.
    #[must_use]
    pub fn wht_amount(base_amount: Decimal, wht_rate: Decimal) -> Money {
        Money::new(apply_rate(base_amount, wht_rate, "wht_amount"))
    }

    /// Amount actually received after withholding: `round2(grand_total - wht_amount)`.
    ///
    /// Not floored at zero. A negative result means the withholding exceeds
    /// the invoice, which is a data-entry problem the caller should surface.
    #[must_use]
    pub fn net_received(grand_total: Decimal, wht_amount: Decimal) -> Money {
        let net = Money::new(checked_or_saturate(
            grand_total.checked_sub(wht_amount),
            || grand_total.saturating_sub(wht_amount),
            "net_received",
        ));
        if net.is_negative() {
            warn!(%grand_total, %wht_amount, %net, "withholding exceeds grand total");
        }
        net
    }

    /// VAT payable: `round2(vat_output - vat_input)`.
    ///
    /// Positive means tax is owed to the Revenue Department, negative is a
    /// refund position.
    #[must_use]
    pub fn vat_payable(vat_output: Decimal, vat_input: Decimal) -> Money {
        Money::new(checked_or_saturate(
            vat_output.checked_sub(vat_input),
            || vat_output.saturating_sub(vat_input),
            "vat_payable",
        ))
    }

    /// Line total of an order item: `round2(quantity * unit_price)`.
    #[must_use]
    pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Money {
        Money::new(checked_or_saturate(
            quantity.checked_mul(unit_price),
            || quantity.saturating_mul(unit_price),
            "line_total",
        ))
    }

    /// Composes all of the above into a [`TaxBreakdown`].
    ///
    /// When `wht_rate` or `wht_base` is absent or zero, no tax is withheld
    /// and `net_received == grand_total`.
    #[must_use]
    pub fn tax_breakdown(
        sub_total: Decimal,
        vat_rate: Decimal,
        wht_rate: Option<Decimal>,
        wht_base: Option<Decimal>,
    ) -> TaxBreakdown {
        let vat_amount = Self::vat_amount(sub_total, vat_rate);
        let grand_total = Self::grand_total(sub_total, vat_rate);

        let (wht_amount, net_received) = match (wht_rate, wht_base) {
            (Some(rate), Some(base)) if !rate.is_zero() && !base.is_zero() => {
                let wht = Self::wht_amount(base, rate);
                (wht, Self::net_received(grand_total.amount(), wht.amount()))
            }
            _ => (Money::zero(), grand_total),
        };

        TaxBreakdown {
            sub_total: Money::new(sub_total),
            vat_rate,
            vat_amount,
            grand_total,
            wht_rate: wht_rate.unwrap_or(Decimal::ZERO),
            wht_base: Money::new(wht_base.unwrap_or(Decimal::ZERO)),
            wht_amount,
            net_received,
        }
    }
}

/// `amount * rate / 100`.
///
/// The rate is scaled first, so any rate up to 100% cannot overflow.
fn apply_rate(amount: Decimal, rate: Decimal, operation: &'static str) -> Decimal {
    let fraction = rate / Decimal::ONE_HUNDRED;
    checked_or_saturate(
        amount.checked_mul(fraction),
        || amount.saturating_mul(fraction),
        operation,
    )
}

fn checked_or_saturate(
    checked: Option<Decimal>,
    saturate: impl FnOnce() -> Decimal,
    operation: &'static str,
) -> Decimal {
    checked.unwrap_or_else(|| {
        let saturated = saturate();
        warn!(operation, %saturated, "amount out of range, saturating");
        saturated
    })
}
