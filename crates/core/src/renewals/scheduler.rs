//! Renewal date projection for a single holding.
//!
//! Next and previous renewal dates are projected forward from the
//! acquisition anchor, never from "today", so repeated calls are
//! deterministic and idempotent.

use chrono::{Months, NaiveDate, Utc};

use crate::constants::DAYS_PER_YEAR;
use crate::holdings::Holding;
use crate::renewals::renewals_model::RenewalInfo;

/// Renewal schedule of `holding` relative to `target_year`.
///
/// Callers must filter out holdings without an expiry date first; see
/// `RenewalService::annual_renewal_cost`.
pub fn renewal_status(holding: &Holding, target_year: i32) -> RenewalInfo {
    renewal_status_as_of(holding, target_year, Utc::now().date_naive())
}

/// Same as [`renewal_status`] with an explicit "today", which only affects
/// the display-oriented `years_until_renewal` figure.
pub fn renewal_status_as_of(holding: &Holding, target_year: i32, today: NaiveDate) -> RenewalInfo {
    let expiry = holding.expiry_date.unwrap_or(NaiveDate::MAX);
    let needs_renewal_this_year = expiry <= year_end(target_year);

    let next_renewal_date = if needs_renewal_this_year {
        expiry
    } else {
        project_from_acquisition(holding, holding.renewal_count + 1)
    };

    let previous_renewal_date = if holding.renewal_count > 0 {
        Some(project_from_acquisition(holding, holding.renewal_count))
    } else {
        None
    };

    let days_until = (next_renewal_date - today).num_days();
    let years_until_renewal = (days_until as f64 / DAYS_PER_YEAR).max(0.0);

    RenewalInfo {
        holding_id: holding.id.clone(),
        needs_renewal_this_year,
        next_renewal_date,
        previous_renewal_date,
        years_until_renewal,
        is_lapsed: holding.is_lapsed(today),
    }
}

/// Acquisition date plus `renewals * cycle` years.
fn project_from_acquisition(holding: &Holding, renewals: u32) -> NaiveDate {
    let months = renewals * holding.renewal_cycle_years * 12;
    holding.acquisition_date + Months::new(months)
}

fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}
