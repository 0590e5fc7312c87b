//! Monthly tax and profit summary.
//!
//! Turns the raw aggregates of one accounting period (sales tax invoices,
//! expenses, withholding certificates) into the figures needed for the
//! monthly VAT return and management P&L.

pub mod service;
pub mod types;

pub use service::MonthlySummaryService;
pub use types::{
    AllocationMethod, AmountSums, AmountTotals, GoodsStream, MonthlySummary, MonthlyTotals,
    ProfitAndLoss, ServiceStream, StreamBreakdown, VatPosition, WhtTotals,
};
