//! Forecast module - renewal cost-trend prediction.

mod forecast_model;
mod forecast_service;


pub use forecast_model::{CostTrend, RenewalCostAnalysis};
pub use forecast_service::{
    analyze_history, classify_trend, predict_next_cost, ForecastService, ForecastServiceTrait,
};
