//! Expiry monitoring domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::constants::{DEFAULT_CRITICAL_DAYS, DEFAULT_URGENT_DAYS, DEFAULT_WARNING_DAYS};
use crate::holdings::Holding;

/// Proximity of a holding to its expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertUrgency {
    Normal,
    Warning,
    Urgent,
    Critical,
}

/// How often the monitor re-checks the holding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl AlertFrequency {
    /// Fixed check period for this frequency.
    pub fn period(&self) -> Duration {
        match self {
            AlertFrequency::Daily => Duration::from_secs(24 * 60 * 60),
            AlertFrequency::Weekly => Duration::from_secs(7 * 24 * 60 * 60),
            AlertFrequency::Monthly => Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}

/// Tunable expiry thresholds, in days before expiry. Updates take effect
/// on the next scheduled check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSettings {
    pub critical_days: i64,
    pub urgent_days: i64,
    pub warning_days: i64,
    pub alert_frequency: AlertFrequency,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        MonitorSettings {
            critical_days: DEFAULT_CRITICAL_DAYS,
            urgent_days: DEFAULT_URGENT_DAYS,
            warning_days: DEFAULT_WARNING_DAYS,
            alert_frequency: AlertFrequency::Daily,
        }
    }
}

/// A derived, ephemeral expiry alert. Regenerated on every check, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlert {
    pub id: String,
    pub holding_id: String,
    pub holding_name: String,
    pub expiry_date: NaiveDate,
    /// Negative once the expiry date has passed.
    pub days_until_expiry: i64,
    pub urgency: AlertUrgency,
    pub is_expired: bool,
    pub message: String,
}

impl ExpiryAlert {
    pub fn new(
        holding: &Holding,
        expiry_date: NaiveDate,
        days_until_expiry: i64,
        urgency: AlertUrgency,
    ) -> Self {
        let is_expired = days_until_expiry < 0;
        ExpiryAlert {
            id: Uuid::new_v4().to_string(),
            holding_id: holding.id.clone(),
            holding_name: holding.name.clone(),
            expiry_date,
            days_until_expiry,
            urgency,
            is_expired,
            message: Self::message_text(&holding.name, days_until_expiry, urgency, is_expired),
        }
    }

    /// Alert text for one holding, selected by urgency tier.
    pub fn message_text(
        name: &str,
        days_until_expiry: i64,
        urgency: AlertUrgency,
        is_expired: bool,
    ) -> String {
        if is_expired {
            return format!(
                "{} expired {} day(s) ago. Restore it now or release it.",
                name,
                days_until_expiry.abs()
            );
        }
        match urgency {
            AlertUrgency::Critical => format!(
                "{} expires in {} day(s). Renew immediately.",
                name, days_until_expiry
            ),
            AlertUrgency::Urgent => format!(
                "{} expires in {} day(s). Schedule its renewal.",
                name, days_until_expiry
            ),
            AlertUrgency::Warning => format!(
                "{} expires in {} day(s). Plan for its renewal.",
                name, days_until_expiry
            ),
            AlertUrgency::Normal => format!(
                "{} expires in {} day(s). No action needed yet.",
                name, days_until_expiry
            ),
        }
    }
}
