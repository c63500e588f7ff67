//! Financial metrics domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio-scope financial metrics.
///
/// Gross profit subtracts acquisition spend only; net profit also
/// subtracts renewal spend. The two are deliberately distinct and must not
/// be conflated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    /// Sum of sale-type transaction amounts before fees.
    pub gross_sales: Decimal,
    /// Sum of sale-type net amounts (after platform fees).
    pub net_revenue: Decimal,
    pub total_platform_fees: Decimal,
    /// Sum of cost-type transaction amounts (buy, renew, fee).
    pub total_cost_spend: Decimal,
    /// Acquisition spend over all holdings regardless of status.
    pub total_acquisition_cost: Decimal,
    /// Acquisition plus renewal spend over all holdings.
    pub total_holding_cost: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    /// Net profit over total holding cost, as a percentage.
    pub roi: Decimal,
    pub profit_margin: Decimal,
    pub gross_margin: Decimal,
    pub sale_count: usize,
}

impl FinancialMetrics {
    pub fn zero() -> Self {
        FinancialMetrics {
            gross_sales: Decimal::ZERO,
            net_revenue: Decimal::ZERO,
            total_platform_fees: Decimal::ZERO,
            total_cost_spend: Decimal::ZERO,
            total_acquisition_cost: Decimal::ZERO,
            total_holding_cost: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            roi: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
            gross_margin: Decimal::ZERO,
            sale_count: 0,
        }
    }
}

/// Per-holding return metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainRoi {
    pub holding_id: String,
    pub name: String,
    /// Acquisition plus renewal spend to date.
    pub total_investment: Decimal,
    pub gross_revenue: Decimal,
    pub net_revenue: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub roi: Decimal,
    /// Days between acquisition and sale, or acquisition and today while
    /// unsold. Reporting only.
    pub holding_period_days: i64,
    /// Expired without a sale: the position is modeled as a complete loss.
    pub is_total_loss: bool,
}
