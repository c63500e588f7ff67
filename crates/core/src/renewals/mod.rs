//! Renewals module - scheduling, annual aggregation, and suggestions.

mod renewals_model;
mod renewals_service;
mod scheduler;

#[cfg(test)]
mod renewals_service_tests;

pub use renewals_model::{
    AnnualRenewalAnalysis, HoldingRenewal, OptimizationSuggestion, RenewalInfo, SuggestionKind,
};
pub use renewals_service::{
    annual_renewal_cost_as_of, annual_renewal_cost_for, RenewalService, RenewalServiceTrait,
};
pub use scheduler::{renewal_status, renewal_status_as_of};
