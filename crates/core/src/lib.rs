//! Domainfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the renewal-forecasting and financial-analytics
//! engine for Domainfolio. It is storage-agnostic and defines repository
//! traits that are implemented by the storage crates.

pub mod constants;
pub mod errors;
pub mod forecast;
pub mod holdings;
pub mod metrics;
pub mod monitor;
pub mod renewals;

// Re-export common types from the holdings and renewals modules
pub use holdings::*;
pub use renewals::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
