use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait, HoldingStatus};
use crate::renewals::renewals_service::{
    annual_renewal_cost_as_of, RenewalService, RenewalServiceTrait,
};
use crate::renewals::scheduler::renewal_status_as_of;
use crate::renewals::SuggestionKind;

// ============== Fixtures ==============

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixed "today" so duration figures are deterministic.
fn today() -> NaiveDate {
    date(2025, 6, 15)
}

fn holding(id: &str, expiry: Option<NaiveDate>, cost: Decimal) -> Holding {
    Holding {
        id: id.to_string(),
        name: format!("{}.com", id),
        acquisition_date: date(2023, 1, 1),
        purchase_cost: Some(dec!(100)),
        renewal_cost: Some(cost),
        renewal_cycle_years: 1,
        renewal_count: 1,
        expiry_date: expiry,
        status: HoldingStatus::Active,
        estimated_value: None,
        sale_date: None,
        sale_price: None,
        sale_platform_fee: None,
        notes: None,
    }
}

fn kinds(analysis: &crate::renewals::AnnualRenewalAnalysis) -> Vec<SuggestionKind> {
    analysis.suggestions.iter().map(|s| s.kind).collect()
}

struct MockHoldingRepository {
    holdings: Vec<Holding>,
}

impl HoldingRepositoryTrait for MockHoldingRepository {
    fn get_holdings(&self) -> Result<Vec<Holding>> {
        Ok(self.holdings.clone())
    }

    fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        self.holdings
            .iter()
            .find(|h| h.id == holding_id)
            .cloned()
            .ok_or_else(|| crate::errors::Error::Repository(holding_id.to_string()))
    }
}

// ============== Scheduler ==============

#[test]
fn test_needs_renewal_boundary_at_year_end() {
    let mut h = holding("a", Some(date(2025, 12, 31)), dec!(50));
    let info = renewal_status_as_of(&h, 2025, today());
    assert!(info.needs_renewal_this_year);

    h.expiry_date = Some(date(2026, 1, 1));
    let info = renewal_status_as_of(&h, 2025, today());
    assert!(!info.needs_renewal_this_year);
}

#[test]
fn test_example_scenario_target_year_matches_expiry() {
    // Acquired 2023-01-01, cycle 1 year, one renewal done, expires 2025-01-01.
    let h = holding("a", Some(date(2025, 1, 1)), dec!(50));

    let info = renewal_status_as_of(&h, 2025, today());
    assert!(info.needs_renewal_this_year);
    assert_eq!(info.next_renewal_date, date(2025, 1, 1));
    assert_eq!(info.previous_renewal_date, Some(date(2024, 1, 1)));
}

#[test]
fn test_example_scenario_earlier_target_year_projects_from_acquisition() {
    let h = holding("a", Some(date(2025, 1, 1)), dec!(50));

    // Not due in 2024; next renewal is acquisition + 2 cycles.
    let info = renewal_status_as_of(&h, 2024, date(2024, 6, 15));
    assert!(!info.needs_renewal_this_year);
    assert_eq!(info.next_renewal_date, date(2025, 1, 1));
}

#[test]
fn test_no_previous_renewal_before_first_renewal() {
    let mut h = holding("a", Some(date(2026, 1, 1)), dec!(50));
    h.renewal_count = 0;
    let info = renewal_status_as_of(&h, 2025, today());
    assert_eq!(info.previous_renewal_date, None);
    // Next renewal projects one cycle past acquisition.
    assert_eq!(info.next_renewal_date, date(2024, 1, 1));
}

#[test]
fn test_multi_year_cycle_projection() {
    let mut h = holding("a", Some(date(2028, 3, 1)), dec!(50));
    h.acquisition_date = date(2022, 3, 1);
    h.renewal_cycle_years = 3;
    h.renewal_count = 1;

    let info = renewal_status_as_of(&h, 2025, today());
    assert!(!info.needs_renewal_this_year);
    // acquisition + 2 * 3 years
    assert_eq!(info.next_renewal_date, date(2028, 3, 1));
    assert_eq!(info.previous_renewal_date, Some(date(2025, 3, 1)));
}

#[test]
fn test_years_until_renewal_floored_at_zero_for_past_expiry() {
    // Expired in 2024 but still marked active: the date-based decision says
    // "needs renewal", and the wall-clock duration floors at zero.
    let h = holding("a", Some(date(2024, 5, 1)), dec!(50));
    let info = renewal_status_as_of(&h, 2025, today());
    assert!(info.needs_renewal_this_year);
    assert!(info.is_lapsed);
    assert_eq!(info.years_until_renewal, 0.0);
}

#[test]
fn test_years_until_renewal_positive_for_future_expiry() {
    let h = holding("a", Some(date(2026, 6, 15)), dec!(50));
    let info = renewal_status_as_of(&h, 2026, today());
    assert!(info.years_until_renewal > 0.9 && info.years_until_renewal < 1.1);
}

// ============== Annual aggregation ==============

#[test]
fn test_partitions_disjoint_and_exhaustive() {
    let mut sold = holding("sold", Some(date(2025, 4, 1)), dec!(50));
    sold.status = HoldingStatus::Sold;

    let holdings = vec![
        holding("due1", Some(date(2025, 2, 10)), dec!(100)),
        holding("due2", Some(date(2025, 9, 1)), dec!(40)),
        holding("later", Some(date(2026, 2, 10)), dec!(70)),
        holding("no-expiry", None, dec!(30)),
        sold,
    ];

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());

    let needing: HashSet<_> = analysis
        .needing_renewal
        .iter()
        .map(|h| h.holding_id.clone())
        .collect();
    let not_needing: HashSet<_> = analysis
        .not_needing_renewal
        .iter()
        .map(|h| h.holding_id.clone())
        .collect();

    assert_eq!(needing, ["due1", "due2"].iter().map(|s| s.to_string()).collect());
    assert_eq!(not_needing, ["later"].iter().map(|s| s.to_string()).collect());
    assert!(needing.is_disjoint(&not_needing));

    // Total covers exactly the needing partition.
    assert_eq!(analysis.total_annual_cost, dec!(140));
}

#[test]
fn test_cost_by_month_has_twelve_buckets_summing_to_total() {
    let holdings = vec![
        holding("a", Some(date(2025, 2, 10)), dec!(100)),
        holding("b", Some(date(2025, 2, 20)), dec!(100)),
        holding("c", Some(date(2025, 8, 5)), dec!(100)),
    ];

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());

    assert_eq!(analysis.cost_by_month.len(), 12);
    assert_eq!(
        analysis.cost_by_month.iter().sum::<Decimal>(),
        analysis.total_annual_cost
    );
    assert_eq!(analysis.cost_by_month[1], dec!(200));
    assert_eq!(analysis.cost_by_month[7], dec!(100));
}

#[test]
fn test_cost_by_cycle_buckets() {
    let mut three_year = holding("b", Some(date(2025, 5, 1)), dec!(90));
    three_year.renewal_cycle_years = 3;

    let holdings = vec![holding("a", Some(date(2025, 2, 1)), dec!(10)), three_year];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());

    assert_eq!(analysis.cost_by_cycle.get("1-year"), Some(&dec!(10)));
    assert_eq!(analysis.cost_by_cycle.get("3-year"), Some(&dec!(90)));
}

#[test]
fn test_missing_renewal_cost_counts_as_zero() {
    let mut free = holding("a", Some(date(2025, 2, 1)), dec!(0));
    free.renewal_cost = None;
    let holdings = vec![free, holding("b", Some(date(2025, 3, 1)), dec!(25))];

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    assert_eq!(analysis.total_annual_cost, dec!(25));
    assert_eq!(analysis.needing_renewal.len(), 2);
}

#[test]
fn test_service_reads_repository() {
    let repository = Arc::new(MockHoldingRepository {
        holdings: vec![holding("a", Some(date(2025, 2, 1)), dec!(12))],
    });
    let service = RenewalService::new(repository);

    let analysis = service.annual_renewal_cost(2025).unwrap();
    assert_eq!(analysis.total_annual_cost, dec!(12));
}

// ============== Suggestions ==============

#[test]
fn test_no_renewals_short_circuits_to_invest_suggestion() {
    let holdings = vec![holding("later", Some(date(2026, 3, 1)), dec!(50))];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());

    assert_eq!(kinds(&analysis), vec![SuggestionKind::GoodTimeToInvest]);
}

#[test]
fn test_month_concentration_warning() {
    // Feb 200 vs monthly average 25: ratio 8, well past 2.5.
    let holdings = vec![
        holding("a", Some(date(2025, 2, 10)), dec!(100)),
        holding("b", Some(date(2025, 2, 20)), dec!(100)),
        holding("c", Some(date(2025, 8, 5)), dec!(100)),
    ];

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    let kinds = kinds(&analysis);
    assert!(kinds.contains(&SuggestionKind::MonthConcentration));
    assert!(!kinds.contains(&SuggestionKind::EvenDistribution));

    // The peak month is named in the message.
    let msg = &analysis
        .suggestions
        .iter()
        .find(|s| s.kind == SuggestionKind::MonthConcentration)
        .unwrap()
        .message;
    assert!(msg.contains("February"));
}

#[test]
fn test_even_distribution_praised() {
    // One 100-cost renewal in every month: ratio exactly 1.0.
    let holdings: Vec<Holding> = (1..=12)
        .map(|m| holding(&format!("h{}", m), Some(date(2025, m, 15)), dec!(100)))
        .collect();

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    assert!(kinds(&analysis).contains(&SuggestionKind::EvenDistribution));
}

#[test]
fn test_cycle_concentration_and_diversification() {
    // 1-year bucket holds ~91% of spend.
    let mut two_year = holding("b", Some(date(2025, 5, 1)), dec!(10));
    two_year.renewal_cycle_years = 2;
    let holdings = vec![holding("a", Some(date(2025, 2, 1)), dec!(100)), two_year];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    assert!(kinds(&analysis).contains(&SuggestionKind::CycleConcentration));

    // Three buckets at 35/35/30: dominant share 35%, below 40%.
    let mut b = holding("b", Some(date(2025, 5, 1)), dec!(35));
    b.renewal_cycle_years = 2;
    let mut c = holding("c", Some(date(2025, 8, 1)), dec!(30));
    c.renewal_cycle_years = 3;
    let holdings = vec![holding("a", Some(date(2025, 2, 1)), dec!(35)), b, c];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    assert!(kinds(&analysis).contains(&SuggestionKind::CycleDiversification));
}

#[test]
fn test_single_cycle_bucket_emits_no_cycle_suggestion() {
    let holdings = vec![
        holding("a", Some(date(2025, 2, 1)), dec!(100)),
        holding("b", Some(date(2025, 5, 1)), dec!(100)),
    ];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    let kinds = kinds(&analysis);
    assert!(!kinds.contains(&SuggestionKind::CycleConcentration));
    assert!(!kinds.contains(&SuggestionKind::CycleDiversification));
}

#[test]
fn test_renewal_to_value_ratio_suggestions() {
    // 200 renewal spend against 2 * 500 estimated value: ratio 0.2 > 0.10.
    let mut a = holding("a", Some(date(2025, 2, 1)), dec!(100));
    a.estimated_value = Some(dec!(500));
    let mut b = holding("b", Some(date(2025, 8, 1)), dec!(100));
    b.estimated_value = Some(dec!(500));
    let analysis = annual_renewal_cost_as_of(&[a, b], 2025, today());
    assert!(kinds(&analysis).contains(&SuggestionKind::DropLowValueRenewals));

    // 20 renewal spend against 2 * 10000: ratio 0.001 < 0.02.
    let mut a = holding("a", Some(date(2025, 2, 1)), dec!(10));
    a.estimated_value = Some(dec!(10000));
    let mut b = holding("b", Some(date(2025, 8, 1)), dec!(10));
    b.estimated_value = Some(dec!(10000));
    let analysis = annual_renewal_cost_as_of(&[a, b], 2025, today());
    assert!(kinds(&analysis).contains(&SuggestionKind::CheapToHold));
}

#[test]
fn test_high_value_holding_flagged() {
    // Average value 2600; jewel.com at 10000 exceeds 2x the average.
    let values = [dec!(10000), dec!(100), dec!(100), dec!(200)];
    let mut holdings: Vec<Holding> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mut h = holding(&format!("h{}", i), Some(date(2025, 3, 1)), dec!(10));
            h.estimated_value = Some(*v);
            h
        })
        .collect();
    holdings[0].name = "jewel.com".to_string();

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    let flagged: Vec<_> = analysis
        .suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::HighValueRenewalDue)
        .collect();
    assert_eq!(flagged.len(), 1);
    assert!(flagged[0].message.contains("jewel.com"));
}

#[test]
fn test_total_cost_thresholds() {
    // 60k total: bulk negotiation, not batch.
    let holdings = vec![
        holding("a", Some(date(2025, 2, 1)), dec!(30000)),
        holding("b", Some(date(2025, 8, 1)), dec!(30000)),
    ];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    let kinds_a = kinds(&analysis);
    assert!(kinds_a.contains(&SuggestionKind::BulkNegotiation));
    assert!(!kinds_a.contains(&SuggestionKind::BatchRenewal));

    // 12k total: batch evaluation.
    let holdings = vec![
        holding("a", Some(date(2025, 2, 1)), dec!(6000)),
        holding("b", Some(date(2025, 8, 1)), dec!(6000)),
    ];
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    assert!(kinds(&analysis).contains(&SuggestionKind::BatchRenewal));
}

#[test]
fn test_needing_count_thresholds() {
    // 21 holdings, one per month cycling, low costs: reminders fire.
    let holdings: Vec<Holding> = (0..21)
        .map(|i| {
            holding(
                &format!("h{}", i),
                Some(date(2025, (i % 12) + 1, 10)),
                dec!(5),
            )
        })
        .collect();
    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    let kinds = kinds(&analysis);
    assert!(kinds.contains(&SuggestionKind::RenewalReminders));
    assert!(!kinds.contains(&SuggestionKind::ManagementSystem));
}

#[test]
fn test_suggestions_never_empty() {
    // Ratio 2.4 sits between the even (1.2) and concentration (2.5)
    // thresholds; single cycle bucket, no values, small totals.
    let mut holdings: Vec<Holding> = (1..=6)
        .map(|m| holding(&format!("h{}", m), Some(date(2025, m, 15)), dec!(100)))
        .collect();
    holdings.push(holding("peak", Some(date(2025, 7, 15)), dec!(150)));

    let analysis = annual_renewal_cost_as_of(&holdings, 2025, today());
    assert_eq!(kinds(&analysis), vec![SuggestionKind::KeepReviewing]);
}
