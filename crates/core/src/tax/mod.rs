//! Thai tax arithmetic: VAT, withholding tax, and derived totals.
//!
//! Everything here is pure. Inputs are `Decimal` of any precision; outputs
//! are [`Money`](thaibooks_shared::Money) values rounded half away from zero
//! to exactly two decimal places.

pub mod calculator;
pub mod types;

#[cfg(test)]
mod props;

pub use calculator::{DEFAULT_VAT_RATE, DEFAULT_WHT_SERVICE_RATE, TaxCalculator};
pub use types::TaxBreakdown;
