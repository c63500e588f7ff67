use std::sync::Arc;

use log::debug;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::Result;
use crate::forecast::forecast_model::{CostTrend, RenewalCostAnalysis};
use crate::holdings::{
    Holding, HoldingRepositoryTrait, RenewalCostRecord, RenewalHistoryRepositoryTrait,
};

/// Relative change between half-means below which a series counts as
/// stable.
const TREND_THRESHOLD: Decimal = dec!(0.05);

/// Trait for renewal cost-trend operations.
pub trait ForecastServiceTrait: Send + Sync {
    /// Cost analysis for one holding from its stored renewal history.
    fn analyze_renewal_costs(&self, holding_id: &str) -> Result<RenewalCostAnalysis>;
}

pub struct ForecastService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    history_repository: Arc<dyn RenewalHistoryRepositoryTrait>,
}

impl ForecastService {
    pub fn new(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        history_repository: Arc<dyn RenewalHistoryRepositoryTrait>,
    ) -> Self {
        ForecastService {
            holding_repository,
            history_repository,
        }
    }
}

impl ForecastServiceTrait for ForecastService {
    fn analyze_renewal_costs(&self, holding_id: &str) -> Result<RenewalCostAnalysis> {
        let holding = self.holding_repository.get_holding(holding_id)?;
        let history = self.history_repository.get_renewal_history(holding_id)?;
        debug!(
            "Analyzing {} renewal records for holding {}",
            history.len(),
            holding_id
        );
        Ok(analyze_history(&holding, &history))
    }
}

/// Cost analysis over a holding's renewal history (most recent first).
///
/// With no history the holding's static renewal cost is reported as both
/// current and average, with a stable trend.
pub fn analyze_history(holding: &Holding, history: &[RenewalCostRecord]) -> RenewalCostAnalysis {
    if history.is_empty() {
        let static_cost = holding.renewal_cost.unwrap_or(Decimal::ZERO);
        return RenewalCostAnalysis {
            holding_id: holding.id.clone(),
            current_cost: static_cost,
            average_cost: static_cost,
            trend: CostTrend::Stable,
            predicted_next_cost: static_cost,
            variance_percent: Decimal::ZERO,
            record_count: 0,
        };
    }

    let latest = history[0].cost;
    let average = history.iter().map(|r| r.cost).sum::<Decimal>() / Decimal::from(history.len());

    // History is stored newest-first; trend and regression both want
    // chronological order.
    let chronological: Vec<Decimal> = history.iter().rev().map(|r| r.cost).collect();

    let variance_percent = if average > Decimal::ZERO {
        (latest - average) / average * dec!(100)
    } else {
        Decimal::ZERO
    };

    RenewalCostAnalysis {
        holding_id: holding.id.clone(),
        current_cost: latest,
        average_cost: average,
        trend: classify_trend(&chronological),
        predicted_next_cost: predict_next_cost(history),
        variance_percent,
        record_count: history.len(),
    }
}

/// Predicted cost of the next renewal from history ordered most recent
/// first.
///
/// Ordinary least squares over `(index, cost)` in chronological order,
/// extrapolated one step past the last record and clamped at zero. An
/// empty history predicts zero; a single record predicts itself.
pub fn predict_next_cost(history: &[RenewalCostRecord]) -> Decimal {
    match history.len() {
        0 => Decimal::ZERO,
        1 => history[0].cost,
        _ => {
            let costs: Vec<f64> = history
                .iter()
                .rev()
                .map(|r| r.cost.to_f64().unwrap_or(0.0))
                .collect();
            let predicted = ols_extrapolate(&costs);
            Decimal::from_f64(predicted)
                .unwrap_or(Decimal::ZERO)
                .max(Decimal::ZERO)
        }
    }
}

/// Trend over a chronological (oldest first) cost series.
///
/// Splits the series into halves by index and compares their means; the
/// spacing of renewal dates does not enter the classification.
pub fn classify_trend(costs: &[Decimal]) -> CostTrend {
    if costs.len() < 2 {
        return CostTrend::Stable;
    }

    let mid = costs.len() / 2;
    let first_mean = costs[..mid].iter().sum::<Decimal>() / Decimal::from(mid);
    let second_mean =
        costs[mid..].iter().sum::<Decimal>() / Decimal::from(costs.len() - mid);

    if first_mean == Decimal::ZERO {
        return CostTrend::Stable;
    }

    let change = (second_mean - first_mean) / first_mean;
    if change > TREND_THRESHOLD {
        CostTrend::Increasing
    } else if change < -TREND_THRESHOLD {
        CostTrend::Decreasing
    } else {
        CostTrend::Stable
    }
}

/// Closed-form least-squares fit over `(0..n, y)`, evaluated at `x = n`.
fn ols_extrapolate(ys: &[f64]) -> f64 {
    let n = ys.len() as f64;
    let sum_x: f64 = (0..ys.len()).map(|x| x as f64).sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = ys.iter().enumerate().map(|(x, y)| x as f64 * y).sum();
    let sum_xx: f64 = (0..ys.len()).map(|x| (x as f64) * (x as f64)).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return ys.last().copied().unwrap_or(0.0);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    slope * n + intercept
}
