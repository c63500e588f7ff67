//! Cost-trend forecasting domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a holding's renewal-cost series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// Summary of one holding's renewal-cost history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenewalCostAnalysis {
    pub holding_id: String,
    /// Most recent cost paid, or the holding's static renewal cost when no
    /// history exists.
    pub current_cost: Decimal,
    pub average_cost: Decimal,
    pub trend: CostTrend,
    /// Least-squares extrapolation one renewal ahead, never negative.
    pub predicted_next_cost: Decimal,
    /// `(latest - average) / average * 100`. Reporting only.
    pub variance_percent: Decimal,
    pub record_count: usize,
}
