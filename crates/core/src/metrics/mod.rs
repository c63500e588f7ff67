//! Metrics module - investment-return computation.

mod metrics_model;
mod metrics_service;


pub use metrics_model::{DomainRoi, FinancialMetrics};
pub use metrics_service::{
    annual_metrics_for, domain_roi_as_of, domain_roi_for, portfolio_metrics_for, MetricsService,
    MetricsServiceTrait,
};
