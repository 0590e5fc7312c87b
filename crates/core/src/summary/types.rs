//! Monthly summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thaibooks_shared::Money;

use crate::period::AccountingPeriod;

/// Raw sums of a set of documents, as returned by an aggregate query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSums {
    /// Sum of sub totals.
    pub sub_total: Decimal,
    /// Sum of VAT amounts.
    pub vat: Decimal,
    /// Sum of grand totals.
    pub grand_total: Decimal,
}

/// Aggregates for one accounting period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Tax invoice / receipts issued in the month.
    pub revenue: AmountSums,
    /// All expenses dated in the month.
    pub expenses: AmountSums,
    /// VAT on expenses backed by a tax invoice (claimable input VAT).
    pub vat_input: Decimal,
    /// Sum of amounts tax was withheld from.
    pub wht_base: Decimal,
    /// Sum of tax withheld.
    pub wht_tax: Decimal,
    /// Number of withholding certificates.
    pub wht_count: u64,
    /// Cost of goods sold (inventory purchases and outbound shipping).
    pub cogs: Decimal,
    /// Every other expense category.
    pub opex: Decimal,
    /// Revenue from documents linked to an order.
    pub goods_revenue: Decimal,
    /// Revenue from documents linked to a project.
    pub service_revenue: Decimal,
    /// COGS linked to an order.
    pub goods_cogs: Decimal,
    /// Non-COGS expenses linked to an order.
    pub goods_direct_opex: Decimal,
    /// Expenses linked to a project.
    pub service_direct_cost: Decimal,
    /// Expenses linked to neither an order nor a project.
    pub shared_opex: Decimal,
}

/// Rounded totals of a set of documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountTotals {
    /// Sub total.
    pub sub_total: Money,
    /// VAT.
    pub vat: Money,
    /// Grand total.
    pub grand_total: Money,
}

impl From<AmountSums> for AmountTotals {
    fn from(sums: AmountSums) -> Self {
        Self {
            sub_total: Money::new(sums.sub_total),
            vat: Money::new(sums.vat),
            grand_total: Money::new(sums.grand_total),
        }
    }
}

/// VAT position for the month (basis of the PP.30 return).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatPosition {
    /// VAT charged on sales.
    pub output: Money,
    /// Claimable VAT paid on purchases.
    pub input: Money,
    /// `output - input`; negative is a refund position.
    pub payable: Money,
}

/// Withholding tax totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhtTotals {
    /// Amount tax was withheld from.
    pub base_amount: Money,
    /// Tax withheld.
    pub tax_amount: Money,
    /// Number of certificates.
    pub count: u64,
}

/// Company-level profit and loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Revenue before VAT.
    pub revenue: Money,
    /// Cost of goods sold.
    pub cogs: Money,
    /// `revenue - cogs`.
    pub gross_profit: Money,
    /// Operating expenses.
    pub opex: Money,
    /// `gross_profit - opex`.
    pub operating_profit: Money,
}

/// How shared operating expenses are split between streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationMethod {
    /// Proportional to each stream's revenue.
    RevenueRatio,
}

/// Goods (order-based) stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsStream {
    /// Revenue.
    pub revenue: Money,
    /// Cost of goods sold.
    pub cogs: Money,
    /// Other expenses linked to orders.
    pub direct_opex: Money,
    /// Share of shared OPEX.
    pub allocated_shared_opex: Money,
    /// Revenue less all of the above.
    pub net_operating_profit: Money,
}

/// Service (project-based) stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStream {
    /// Revenue.
    pub revenue: Money,
    /// Expenses linked to projects.
    pub direct_cost: Money,
    /// Share of shared OPEX.
    pub allocated_shared_opex: Money,
    /// Revenue less all of the above.
    pub net_operating_profit: Money,
}

/// P&L split by revenue stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBreakdown {
    /// Goods stream.
    pub goods: GoodsStream,
    /// Service stream.
    pub service: ServiceStream,
    /// Expenses linked to neither stream.
    pub shared_opex: Money,
    /// Allocation rule used.
    pub allocation_method: AllocationMethod,
}

/// Full monthly summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Period summarized.
    pub period: AccountingPeriod,
    /// Sales.
    pub revenue: AmountTotals,
    /// Purchases and expenses.
    pub expenses: AmountTotals,
    /// VAT position.
    pub vat: VatPosition,
    /// Withholding tax.
    pub wht: WhtTotals,
    /// Company P&L.
    pub pnl: ProfitAndLoss,
    /// P&L by stream.
    pub pnl_by_stream: StreamBreakdown,
}
