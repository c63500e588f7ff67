use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, error};
use tokio::task::JoinHandle;

use crate::holdings::{Holding, HoldingRepositoryTrait, HoldingStatus};
use crate::monitor::monitor_model::{AlertUrgency, ExpiryAlert, MonitorSettings};

/// Callback invoked synchronously from each monitoring check. Callers
/// needing asynchronous side effects must hand off and return quickly.
pub type AlertHandler = Arc<dyn Fn(&[ExpiryAlert]) + Send + Sync>;

/// Trait for the expiry monitoring lifecycle.
pub trait ExpiryMonitorTrait: Send + Sync {
    /// Runs one check immediately, then schedules repeated checks at the
    /// configured frequency. No-op when already monitoring.
    fn start_monitoring(&self, on_alert: AlertHandler);
    /// Cancels the repeating check. No-op when idle.
    fn stop_monitoring(&self);
    fn is_monitoring(&self) -> bool;
    fn settings(&self) -> MonitorSettings;
    /// Takes effect on the next scheduled check, not retroactively.
    fn update_settings(&self, settings: MonitorSettings);
}

/// Expiry monitor over a holding source.
///
/// Owns a single repeating check task. Construct one instance per
/// monitoring scope; there is deliberately no process-wide singleton.
pub struct ExpiryMonitor {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    settings: Arc<RwLock<MonitorSettings>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiryMonitor {
    pub fn new(holding_repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self::with_settings(holding_repository, MonitorSettings::default())
    }

    pub fn with_settings(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        settings: MonitorSettings,
    ) -> Self {
        ExpiryMonitor {
            holding_repository,
            settings: Arc::new(RwLock::new(settings)),
            task: Mutex::new(None),
        }
    }
}

impl ExpiryMonitorTrait for ExpiryMonitor {
    fn start_monitoring(&self, on_alert: AlertHandler) {
        let mut task = self.task.lock().unwrap();
        if task.is_some() {
            debug!("Expiry monitor already running");
            return;
        }

        run_check(&*self.holding_repository, &self.settings, &on_alert);

        let repository = Arc::clone(&self.holding_repository);
        let settings = Arc::clone(&self.settings);
        let handle = tokio::spawn(async move {
            loop {
                // Re-read the frequency each cycle so settings updates take
                // effect on the next check.
                let period = settings.read().unwrap().alert_frequency.period();
                tokio::time::sleep(period).await;
                run_check(&*repository, &settings, &on_alert);
            }
        });
        *task = Some(handle);
    }

    fn stop_monitoring(&self) {
        let mut task = self.task.lock().unwrap();
        if let Some(handle) = task.take() {
            handle.abort();
            debug!("Expiry monitor stopped");
        }
    }

    fn is_monitoring(&self) -> bool {
        self.task.lock().unwrap().is_some()
    }

    fn settings(&self) -> MonitorSettings {
        *self.settings.read().unwrap()
    }

    fn update_settings(&self, settings: MonitorSettings) {
        *self.settings.write().unwrap() = settings;
    }
}

impl Drop for ExpiryMonitor {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}

fn run_check(
    repository: &dyn HoldingRepositoryTrait,
    settings: &RwLock<MonitorSettings>,
    on_alert: &AlertHandler,
) {
    let holdings = match repository.get_holdings() {
        Ok(holdings) => holdings,
        Err(e) => {
            error!("Expiry check could not read holdings: {:?}", e);
            return;
        }
    };

    let settings = *settings.read().unwrap();
    let expiring = expiring_domains(&holdings, &settings);
    debug!(
        "Expiry check over {} holdings: {} alert(s)",
        holdings.len(),
        expiring.len()
    );
    if !expiring.is_empty() {
        on_alert(&expiring);
    }
}

/// Classifies every monitorable holding by proximity to expiry.
///
/// Sold and expired holdings, and holdings without an expiry date, are
/// skipped. Results are sorted ascending by days until expiry so the most
/// time-critical holding comes first.
pub fn check_expiry(holdings: &[Holding], settings: &MonitorSettings) -> Vec<ExpiryAlert> {
    check_expiry_at(holdings, settings, Utc::now())
}

/// Same as [`check_expiry`] with an explicit "now".
pub fn check_expiry_at(
    holdings: &[Holding],
    settings: &MonitorSettings,
    now: DateTime<Utc>,
) -> Vec<ExpiryAlert> {
    let mut alerts: Vec<ExpiryAlert> = holdings
        .iter()
        .filter(|h| !matches!(h.status, HoldingStatus::Sold | HoldingStatus::Expired))
        .filter_map(|holding| {
            let expiry = holding.expiry_date?;
            let expiry_midnight = expiry.and_hms_opt(0, 0, 0)?.and_utc();
            let seconds_left = (expiry_midnight - now).num_seconds();
            let days_until_expiry = (seconds_left as f64 / 86_400.0).ceil() as i64;
            let urgency = classify_urgency(days_until_expiry, settings);
            Some(ExpiryAlert::new(holding, expiry, days_until_expiry, urgency))
        })
        .collect();

    alerts.sort_by_key(|a| a.days_until_expiry);
    alerts
}

/// The subset of [`check_expiry`] results worth alerting on: everything
/// expired or inside the warning window.
pub fn expiring_domains(holdings: &[Holding], settings: &MonitorSettings) -> Vec<ExpiryAlert> {
    check_expiry(holdings, settings)
        .into_iter()
        .filter(|a| a.urgency != AlertUrgency::Normal)
        .collect()
}

/// Tier precedence: already expired, then critical, urgent, warning.
fn classify_urgency(days_until_expiry: i64, settings: &MonitorSettings) -> AlertUrgency {
    if days_until_expiry < 0 || days_until_expiry <= settings.critical_days {
        AlertUrgency::Critical
    } else if days_until_expiry <= settings.urgent_days {
        AlertUrgency::Urgent
    } else if days_until_expiry <= settings.warning_days {
        AlertUrgency::Warning
    } else {
        AlertUrgency::Normal
    }
}
