//! Renewal forecasting domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Renewal schedule for one holding relative to a target calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenewalInfo {
    pub holding_id: String,
    /// True iff the expiry date falls on or before Dec 31 of the target
    /// year, even when it is already in the past.
    pub needs_renewal_this_year: bool,
    pub next_renewal_date: NaiveDate,
    pub previous_renewal_date: Option<NaiveDate>,
    /// Wall-clock distance to the next renewal, floored at zero. Display
    /// ordering only; the needs-renewal decision is date-based.
    pub years_until_renewal: f64,
    /// Active holding whose expiry already passed. Flagged, not resolved.
    pub is_lapsed: bool,
}

/// One holding's projected renewal inside an annual analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRenewal {
    pub holding_id: String,
    pub name: String,
    /// Missing renewal costs count as zero in every aggregate.
    pub renewal_cost: Decimal,
    pub renewal_cycle_years: u32,
    pub next_renewal_date: NaiveDate,
    pub years_until_renewal: f64,
    pub estimated_value: Option<Decimal>,
    pub is_lapsed: bool,
}

/// Kinds of qualitative findings derived from an annual renewal analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionKind {
    GoodTimeToInvest,
    MonthConcentration,
    EvenDistribution,
    CycleConcentration,
    CycleDiversification,
    DropLowValueRenewals,
    CheapToHold,
    BulkNegotiation,
    BatchRenewal,
    ManagementSystem,
    RenewalReminders,
    HighValueRenewalDue,
    KeepReviewing,
}

/// A qualitative optimization finding. The list on an analysis is never
/// empty and its order carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    pub kind: SuggestionKind,
    pub message: String,
}

/// Result of aggregating renewal costs over a holding set for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualRenewalAnalysis {
    pub target_year: i32,
    /// Sum of renewal costs over the needing partition only.
    pub total_annual_cost: Decimal,
    pub needing_renewal: Vec<HoldingRenewal>,
    pub not_needing_renewal: Vec<HoldingRenewal>,
    /// Costs bucketed by cycle-length label, e.g. "1-year".
    pub cost_by_cycle: HashMap<String, Decimal>,
    /// Costs bucketed by calendar month of the next renewal date. Always
    /// 12 entries so consumers never index out of range.
    pub cost_by_month: [Decimal; 12],
    pub suggestions: Vec<OptimizationSuggestion>,
}

impl AnnualRenewalAnalysis {
    pub fn empty(target_year: i32) -> Self {
        AnnualRenewalAnalysis {
            target_year,
            total_annual_cost: Decimal::ZERO,
            needing_renewal: Vec::new(),
            not_needing_renewal: Vec::new(),
            cost_by_cycle: HashMap::new(),
            cost_by_month: [Decimal::ZERO; 12],
            suggestions: Vec::new(),
        }
    }
}
