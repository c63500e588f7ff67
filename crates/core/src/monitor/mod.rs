//! Monitor module - expiry watching and tiered alerts.

mod monitor_model;
mod monitor_service;


pub use monitor_model::{AlertFrequency, AlertUrgency, ExpiryAlert, MonitorSettings};
pub use monitor_service::{
    check_expiry, check_expiry_at, expiring_domains, AlertHandler, ExpiryMonitor,
    ExpiryMonitorTrait,
};
