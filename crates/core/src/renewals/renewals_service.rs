use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait, HoldingStatus};
use crate::renewals::renewals_model::{
    AnnualRenewalAnalysis, HoldingRenewal, OptimizationSuggestion, SuggestionKind,
};
use crate::renewals::scheduler::renewal_status_as_of;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Suggestion thresholds. Test fixtures depend on these exact values.
const MONTH_CONCENTRATION_WARN_RATIO: Decimal = dec!(2.5);
const MONTH_EVEN_RATIO: Decimal = dec!(1.2);
const CYCLE_CONCENTRATION_SHARE: Decimal = dec!(0.70);
const CYCLE_DIVERSIFIED_SHARE: Decimal = dec!(0.40);
const RENEWAL_TO_VALUE_HIGH: Decimal = dec!(0.10);
const RENEWAL_TO_VALUE_LOW: Decimal = dec!(0.02);
const BULK_NEGOTIATION_COST: Decimal = dec!(50000);
const BATCH_RENEWAL_COST: Decimal = dec!(10000);
const MANAGEMENT_SYSTEM_COUNT: usize = 100;
const REMINDER_COUNT: usize = 20;
const HIGH_VALUE_MULTIPLE: Decimal = dec!(2);

/// Trait for renewal forecasting operations.
pub trait RenewalServiceTrait: Send + Sync {
    /// Annual renewal analysis over all holdings from the repository.
    fn annual_renewal_cost(&self, target_year: i32) -> Result<AnnualRenewalAnalysis>;
}

pub struct RenewalService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
}

impl RenewalService {
    pub fn new(holding_repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        RenewalService { holding_repository }
    }
}

impl RenewalServiceTrait for RenewalService {
    fn annual_renewal_cost(&self, target_year: i32) -> Result<AnnualRenewalAnalysis> {
        let holdings = self.holding_repository.get_holdings()?;
        Ok(annual_renewal_cost_for(&holdings, target_year))
    }
}

/// Annual renewal analysis over an in-memory holding set.
pub fn annual_renewal_cost_for(holdings: &[Holding], target_year: i32) -> AnnualRenewalAnalysis {
    annual_renewal_cost_as_of(holdings, target_year, Utc::now().date_naive())
}

/// Same as [`annual_renewal_cost_for`] with an explicit "today", which only
/// affects the display-oriented duration figures and the lapsed flag.
pub fn annual_renewal_cost_as_of(
    holdings: &[Holding],
    target_year: i32,
    today: NaiveDate,
) -> AnnualRenewalAnalysis {
    debug!(
        "Computing annual renewal cost for {} holdings, year {}",
        holdings.len(),
        target_year
    );

    let mut analysis = AnnualRenewalAnalysis::empty(target_year);

    for holding in holdings {
        if holding.status != HoldingStatus::Active || holding.expiry_date.is_none() {
            continue;
        }

        let info = renewal_status_as_of(holding, target_year, today);
        if info.is_lapsed {
            warn!(
                "Holding {} ({}) is active but its expiry date {:?} has passed",
                holding.id, holding.name, holding.expiry_date
            );
        }

        let cost = holding.renewal_cost.unwrap_or(Decimal::ZERO);
        let projection = HoldingRenewal {
            holding_id: holding.id.clone(),
            name: holding.name.clone(),
            renewal_cost: cost,
            renewal_cycle_years: holding.renewal_cycle_years,
            next_renewal_date: info.next_renewal_date,
            years_until_renewal: info.years_until_renewal,
            estimated_value: holding.estimated_value,
            is_lapsed: info.is_lapsed,
        };

        if info.needs_renewal_this_year {
            analysis.total_annual_cost += cost;

            let cycle_label = format!("{}-year", holding.renewal_cycle_years);
            *analysis
                .cost_by_cycle
                .entry(cycle_label)
                .or_insert(Decimal::ZERO) += cost;

            let month = info.next_renewal_date.month0() as usize;
            analysis.cost_by_month[month] += cost;

            analysis.needing_renewal.push(projection);
        } else {
            analysis.not_needing_renewal.push(projection);
        }
    }

    analysis.suggestions = derive_suggestions(&analysis);
    analysis
}

/// Qualitative findings for an annual analysis. Never returns an empty
/// list.
fn derive_suggestions(analysis: &AnnualRenewalAnalysis) -> Vec<OptimizationSuggestion> {
    if analysis.needing_renewal.is_empty() {
        return vec![suggestion(
            SuggestionKind::GoodTimeToInvest,
            format!(
                "No renewals are due in {}; a good window to invest in new acquisitions",
                analysis.target_year
            ),
        )];
    }

    let mut suggestions = Vec::new();
    let total = analysis.total_annual_cost;
    let needing_count = analysis.needing_renewal.len();

    // Month concentration: peak month vs the even-spread average.
    if total > Decimal::ZERO {
        let monthly_average = total / dec!(12);
        let (peak_month, peak_cost) = analysis
            .cost_by_month
            .iter()
            .enumerate()
            .max_by_key(|(_, cost)| **cost)
            .map(|(month, cost)| (month, *cost))
            .unwrap_or((0, Decimal::ZERO));
        let concentration = peak_cost / monthly_average;

        if concentration > MONTH_CONCENTRATION_WARN_RATIO {
            suggestions.push(suggestion(
                SuggestionKind::MonthConcentration,
                format!(
                    "Renewal costs concentrate in {}; consider staggering expiry dates to smooth cash flow",
                    MONTH_NAMES[peak_month]
                ),
            ));
        } else if concentration < MONTH_EVEN_RATIO {
            suggestions.push(suggestion(
                SuggestionKind::EvenDistribution,
                "Renewal costs are evenly distributed across the year".to_string(),
            ));
        }
    }

    // Cycle concentration: dominant bucket's share of the annual total.
    if analysis.cost_by_cycle.len() > 1 && total > Decimal::ZERO {
        if let Some((cycle, cost)) = analysis
            .cost_by_cycle
            .iter()
            .max_by_key(|(_, cost)| **cost)
        {
            let share = *cost / total;
            if share > CYCLE_CONCENTRATION_SHARE {
                suggestions.push(suggestion(
                    SuggestionKind::CycleConcentration,
                    format!("Most renewal spend sits in {} registrations", cycle),
                ));
            } else if share < CYCLE_DIVERSIFIED_SHARE {
                suggestions.push(suggestion(
                    SuggestionKind::CycleDiversification,
                    "Renewal spend is healthily diversified across cycle lengths".to_string(),
                ));
            }
        }
    }

    // Renewal cost relative to what the needing holdings are worth.
    let valued: Vec<Decimal> = analysis
        .needing_renewal
        .iter()
        .filter_map(|h| h.estimated_value)
        .collect();
    if !valued.is_empty() {
        let average_value = valued.iter().sum::<Decimal>() / Decimal::from(valued.len());
        let basis = average_value * Decimal::from(needing_count);
        if basis > Decimal::ZERO {
            let ratio = total / basis;
            if ratio > RENEWAL_TO_VALUE_HIGH {
                suggestions.push(suggestion(
                    SuggestionKind::DropLowValueRenewals,
                    "Renewal spend is high relative to estimated values; consider dropping low-value domains".to_string(),
                ));
            } else if ratio < RENEWAL_TO_VALUE_LOW {
                suggestions.push(suggestion(
                    SuggestionKind::CheapToHold,
                    "These domains are cheap to hold relative to their estimated value".to_string(),
                ));
            }
        }

        let high_value_cutoff = average_value * HIGH_VALUE_MULTIPLE;
        for holding in &analysis.needing_renewal {
            if holding
                .estimated_value
                .map(|v| v > high_value_cutoff)
                .unwrap_or(false)
            {
                suggestions.push(suggestion(
                    SuggestionKind::HighValueRenewalDue,
                    format!(
                        "High-value domain {} is due for renewal; do not let it lapse",
                        holding.name
                    ),
                ));
            }
        }
    }

    if total > BULK_NEGOTIATION_COST {
        suggestions.push(suggestion(
            SuggestionKind::BulkNegotiation,
            "Annual renewal spend is large enough to negotiate bulk registrar pricing".to_string(),
        ));
    } else if total > BATCH_RENEWAL_COST {
        suggestions.push(suggestion(
            SuggestionKind::BatchRenewal,
            "Consider renewing in batches to cut per-transaction fees".to_string(),
        ));
    }

    if needing_count > MANAGEMENT_SYSTEM_COUNT {
        suggestions.push(suggestion(
            SuggestionKind::ManagementSystem,
            format!(
                "{} domains renew this year; a dedicated management system would help",
                needing_count
            ),
        ));
    } else if needing_count > REMINDER_COUNT {
        suggestions.push(suggestion(
            SuggestionKind::RenewalReminders,
            format!("{} domains renew this year; set up renewal reminders", needing_count),
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(suggestion(
            SuggestionKind::KeepReviewing,
            "Keep reviewing the portfolio periodically for renewal savings".to_string(),
        ));
    }

    suggestions
}

fn suggestion(kind: SuggestionKind, message: String) -> OptimizationSuggestion {
    OptimizationSuggestion { kind, message }
}
