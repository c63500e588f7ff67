use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::holdings::{
    Holding, HoldingRepositoryTrait, HoldingStatus, Transaction, TransactionRepositoryTrait,
};
use crate::metrics::metrics_model::{DomainRoi, FinancialMetrics};

/// Trait for financial metrics operations.
pub trait MetricsServiceTrait: Send + Sync {
    /// Portfolio-scope metrics over all holdings and transactions.
    fn portfolio_metrics(&self) -> Result<FinancialMetrics>;
    /// Portfolio-scope metrics restricted to transactions dated within the
    /// target calendar year.
    fn annual_metrics(&self, year: i32) -> Result<FinancialMetrics>;
    /// Return metrics for a single holding.
    fn domain_roi(&self, holding_id: &str) -> Result<DomainRoi>;
}

pub struct MetricsService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl MetricsService {
    pub fn new(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        MetricsService {
            holding_repository,
            transaction_repository,
        }
    }
}

impl MetricsServiceTrait for MetricsService {
    fn portfolio_metrics(&self) -> Result<FinancialMetrics> {
        let holdings = self.holding_repository.get_holdings()?;
        let transactions = self.transaction_repository.get_transactions()?;
        debug!(
            "Computing portfolio metrics over {} holdings, {} transactions",
            holdings.len(),
            transactions.len()
        );
        Ok(round_ratios(portfolio_metrics_for(&holdings, &transactions)))
    }

    fn annual_metrics(&self, year: i32) -> Result<FinancialMetrics> {
        let holdings = self.holding_repository.get_holdings()?;
        let transactions = self.transaction_repository.get_transactions()?;
        Ok(round_ratios(annual_metrics_for(&holdings, &transactions, year)))
    }

    fn domain_roi(&self, holding_id: &str) -> Result<DomainRoi> {
        let holding = self.holding_repository.get_holding(holding_id)?;
        let transactions = self
            .transaction_repository
            .get_transactions_for_holding(holding_id)?;
        let mut roi = domain_roi_for(&holding, &transactions);
        roi.roi = roi.roi.round_dp(DISPLAY_DECIMAL_PRECISION);
        Ok(roi)
    }
}

/// Rounds the display ratios; the underlying amounts stay exact.
fn round_ratios(mut metrics: FinancialMetrics) -> FinancialMetrics {
    metrics.roi = metrics.roi.round_dp(DISPLAY_DECIMAL_PRECISION);
    metrics.profit_margin = metrics.profit_margin.round_dp(DISPLAY_DECIMAL_PRECISION);
    metrics.gross_margin = metrics.gross_margin.round_dp(DISPLAY_DECIMAL_PRECISION);
    metrics
}

/// Portfolio metrics over in-memory collections.
pub fn portfolio_metrics_for(
    holdings: &[Holding],
    transactions: &[Transaction],
) -> FinancialMetrics {
    if holdings.is_empty() && transactions.is_empty() {
        return FinancialMetrics::zero();
    }

    let mut metrics = FinancialMetrics::zero();

    for tx in transactions {
        if tx.transaction_type.is_sale() {
            metrics.gross_sales += tx.amount;
            metrics.net_revenue += tx.effective_net_amount();
            metrics.total_platform_fees += tx.platform_fee.unwrap_or(Decimal::ZERO);
            metrics.sale_count += 1;
        } else if tx.transaction_type.is_cost() {
            metrics.total_cost_spend += tx.amount;
        }
    }

    // Holding costs accrue for every holding regardless of status.
    for holding in holdings {
        metrics.total_acquisition_cost += holding.purchase_cost.unwrap_or(Decimal::ZERO);
        metrics.total_holding_cost += holding.holding_cost();
    }

    metrics.gross_profit = metrics.net_revenue - metrics.total_acquisition_cost;
    metrics.net_profit = metrics.net_revenue - metrics.total_holding_cost;
    metrics.roi = percentage(metrics.net_profit, metrics.total_holding_cost);
    metrics.profit_margin = percentage(metrics.net_profit, metrics.net_revenue);
    metrics.gross_margin = percentage(metrics.gross_profit, metrics.gross_sales);

    metrics
}

/// Portfolio metrics with the transaction split restricted to the target
/// calendar year, inclusive on both ends.
pub fn annual_metrics_for(
    holdings: &[Holding],
    transactions: &[Transaction],
    year: i32,
) -> FinancialMetrics {
    let in_year: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| tx.transaction_date.year() == year)
        .cloned()
        .collect();
    portfolio_metrics_for(holdings, &in_year)
}

/// Return metrics for one holding from its transactions.
pub fn domain_roi_for(holding: &Holding, transactions: &[Transaction]) -> DomainRoi {
    domain_roi_as_of(holding, transactions, Utc::now().date_naive())
}

/// Same as [`domain_roi_for`] with an explicit "today" for the holding
/// period and the expired-holding check.
pub fn domain_roi_as_of(
    holding: &Holding,
    transactions: &[Transaction],
    today: NaiveDate,
) -> DomainRoi {
    let total_investment = holding.holding_cost();

    let mut gross_revenue = Decimal::ZERO;
    let mut net_revenue = Decimal::ZERO;
    for tx in transactions {
        if tx.holding_id == holding.id && tx.transaction_type.is_sale() {
            gross_revenue += tx.amount;
            net_revenue += tx.effective_net_amount();
        }
    }

    let period_end = match (holding.status, holding.sale_date) {
        (HoldingStatus::Sold, Some(sale_date)) => sale_date,
        _ => today,
    };
    let holding_period_days = (period_end - holding.acquisition_date).num_days();

    // An expired, unsold holding is a complete loss no matter what partial
    // payments were recorded against it.
    let expired_unsold = holding.status == HoldingStatus::Expired
        || (holding.status != HoldingStatus::Sold
            && holding.expiry_date.map(|d| d < today).unwrap_or(false));

    if expired_unsold {
        return DomainRoi {
            holding_id: holding.id.clone(),
            name: holding.name.clone(),
            total_investment,
            gross_revenue,
            net_revenue,
            gross_profit: -total_investment,
            net_profit: -total_investment,
            roi: dec!(-100),
            holding_period_days,
            is_total_loss: true,
        };
    }

    let gross_profit = net_revenue - holding.purchase_cost.unwrap_or(Decimal::ZERO);
    let net_profit = net_revenue - total_investment;

    DomainRoi {
        holding_id: holding.id.clone(),
        name: holding.name.clone(),
        total_investment,
        gross_revenue,
        net_revenue,
        gross_profit,
        net_profit,
        roi: percentage(net_profit, total_investment),
        holding_period_days,
        is_total_loss: false,
    }
}

/// `numerator / denominator * 100`, or zero when the denominator is zero.
fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator == Decimal::ZERO {
        Decimal::ZERO
    } else {
        numerator / denominator * dec!(100)
    }
}
