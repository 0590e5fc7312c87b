//! Monthly summary calculation.

use rust_decimal::Decimal;
use thaibooks_shared::Money;

use super::types::{
    AllocationMethod, AmountTotals, GoodsStream, MonthlySummary, MonthlyTotals, ProfitAndLoss,
    ServiceStream, StreamBreakdown, VatPosition, WhtTotals,
};
use crate::period::AccountingPeriod;
use crate::tax::TaxCalculator;

/// Builds [`MonthlySummary`] values from period aggregates.
pub struct MonthlySummaryService;

impl MonthlySummaryService {
    /// Summarizes one accounting period.
    #[must_use]
    pub fn summarize(period: AccountingPeriod, totals: &MonthlyTotals) -> MonthlySummary {
        let revenue = AmountTotals::from(totals.revenue);
        let expenses = AmountTotals::from(totals.expenses);

        let vat_output = revenue.vat;
        let vat_input = Money::new(totals.vat_input);
        let vat = VatPosition {
            output: vat_output,
            input: vat_input,
            payable: TaxCalculator::vat_payable(vat_output.amount(), vat_input.amount()),
        };

        let wht = WhtTotals {
            base_amount: Money::new(totals.wht_base),
            tax_amount: Money::new(totals.wht_tax),
            count: totals.wht_count,
        };

        let cogs = Money::new(totals.cogs);
        let opex = Money::new(totals.opex);
        let gross_profit = revenue.sub_total - cogs;
        let pnl = ProfitAndLoss {
            revenue: revenue.sub_total,
            cogs,
            gross_profit,
            opex,
            operating_profit: gross_profit - opex,
        };

        MonthlySummary {
            period,
            revenue,
            expenses,
            vat,
            wht,
            pnl,
            pnl_by_stream: Self::stream_breakdown(totals),
        }
    }

    /// Splits `shared` between goods and service by revenue ratio.
    ///
    /// The service share is the remainder, so the two shares always add up
    /// to `round2(shared)`. When combined revenue is not positive, the whole
    /// amount goes to whichever stream has positive revenue, or nowhere.
    #[must_use]
    pub fn allocate_by_revenue(
        shared: Decimal,
        goods_revenue: Decimal,
        service_revenue: Decimal,
    ) -> (Money, Money) {
        let shared = Money::new(shared);
        let total_revenue = goods_revenue.saturating_add(service_revenue);

        if total_revenue > Decimal::ZERO {
            let ratio = goods_revenue / total_revenue;
            let goods = Money::new(shared.amount().saturating_mul(ratio));
            (goods, shared - goods)
        } else if goods_revenue > Decimal::ZERO {
            (shared, Money::zero())
        } else if service_revenue > Decimal::ZERO {
            (Money::zero(), shared)
        } else {
            (Money::zero(), Money::zero())
        }
    }

    fn stream_breakdown(totals: &MonthlyTotals) -> StreamBreakdown {
        let (goods_share, service_share) = Self::allocate_by_revenue(
            totals.shared_opex,
            totals.goods_revenue,
            totals.service_revenue,
        );

        let goods_revenue = Money::new(totals.goods_revenue);
        let goods_cogs = Money::new(totals.goods_cogs);
        let goods_direct_opex = Money::new(totals.goods_direct_opex);
        let goods = GoodsStream {
            revenue: goods_revenue,
            cogs: goods_cogs,
            direct_opex: goods_direct_opex,
            allocated_shared_opex: goods_share,
            net_operating_profit: goods_revenue - goods_cogs - goods_direct_opex - goods_share,
        };

        let service_revenue = Money::new(totals.service_revenue);
        let service_direct_cost = Money::new(totals.service_direct_cost);
        let service = ServiceStream {
            revenue: service_revenue,
            direct_cost: service_direct_cost,
            allocated_shared_opex: service_share,
            net_operating_profit: service_revenue - service_direct_cost - service_share,
        };

        StreamBreakdown {
            goods,
            service,
            shared_opex: Money::new(totals.shared_opex),
            allocation_method: AllocationMethod::RevenueRatio,
        }
    }
}
