//! Daily reminder dispatch.
//!
//! Decides whether today's reminder should fire, composes it from the low
//! inventory and upcoming bill classifiers, and records the send date so
//! later checks the same day are no-ops. Platform notification APIs and
//! the last-sent date live behind the [`Notifier`] and [`ReminderLedger`]
//! traits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::calculations::today;
use crate::error::Result;
use crate::household::{Bill, InventoryItem};
use crate::thresholds::{
    low_inventory_items_with, upcoming_bills_with, LOW_ITEM_THRESHOLD_DAYS,
    UPCOMING_BILL_WINDOW_DAYS,
};

/// Title shown on every reminder.
pub const REMINDER_TITLE: &str = "Hearthkeep";

/// Default spacing between scheduled checks.
pub const DAILY: Duration = Duration::from_secs(24 * 60 * 60);

/// Whether the platform lets us show notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Unsupported,
    /// Not yet asked.
    Default,
    Granted,
    Denied,
}

/// Platform notification surface.
pub trait Notifier {
    fn permission(&self) -> NotificationPermission;

    /// Ask the user for permission. Returns the resulting state.
    fn request_permission(&mut self) -> std::result::Result<NotificationPermission, Box<dyn std::error::Error + Send + Sync>>;

    fn notify(&mut self, title: &str, body: &str) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Where the last reminder date is kept.
pub trait ReminderLedger {
    fn last_reminder_date(&self) -> Result<Option<NaiveDate>>;
    fn set_last_reminder_date(&mut self, date: NaiveDate) -> Result<()>;
}

impl<T: ReminderLedger + ?Sized> ReminderLedger for &mut T {
    fn last_reminder_date(&self) -> Result<Option<NaiveDate>> {
        (**self).last_reminder_date()
    }

    fn set_last_reminder_date(&mut self, date: NaiveDate) -> Result<()> {
        (**self).set_last_reminder_date(date)
    }
}

/// Classifier thresholds the reminder uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderPolicy {
    pub low_item_days: f64,
    pub upcoming_bill_days: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            low_item_days: LOW_ITEM_THRESHOLD_DAYS,
            upcoming_bill_days: UPCOMING_BILL_WINDOW_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderOptions {
    /// Do not prompt for permission when it has not been decided yet.
    pub skip_permission_request: bool,
}

/// What a single check did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReminderOutcome {
    Unsupported,
    NotPermitted,
    AlreadySentToday,
    NothingToReport,
    Dispatched { body: String },
    DispatchFailed { body: String },
}

/// Compose the reminder body, or `None` when there is nothing to say.
pub fn compose_reminder(low_items: &[&InventoryItem], upcoming: &[&Bill]) -> Option<String> {
    let mut parts = Vec::new();
    if !low_items.is_empty() {
        let names = low_items
            .iter()
            .map(|item| format!("{} ({})", item.name, item.location))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Low supplies: {names}"));
    }
    if !upcoming.is_empty() {
        let names = upcoming
            .iter()
            .map(|bill| bill.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Upcoming bills: {names}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

pub struct ReminderDispatcher<N, L> {
    notifier: N,
    ledger: L,
    policy: ReminderPolicy,
}

impl<N: Notifier, L: ReminderLedger> ReminderDispatcher<N, L> {
    pub fn new(notifier: N, ledger: L) -> Self {
        Self {
            notifier,
            ledger,
            policy: ReminderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReminderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Run one reminder check for `today`.
    ///
    /// # Errors
    /// Returns an error only if the ledger cannot be read or written.
    /// Notification failures are logged and reported as
    /// [`ReminderOutcome::DispatchFailed`].
    pub fn check_and_notify(
        &mut self,
        items: &[InventoryItem],
        bills: &[Bill],
        options: ReminderOptions,
        today: NaiveDate,
    ) -> Result<ReminderOutcome> {
        match self.notifier.permission() {
            NotificationPermission::Unsupported => return Ok(ReminderOutcome::Unsupported),
            NotificationPermission::Default if !options.skip_permission_request => {
                return match self.notifier.request_permission() {
                    Ok(NotificationPermission::Granted) => self.check_and_notify(
                        items,
                        bills,
                        ReminderOptions {
                            skip_permission_request: true,
                        },
                        today,
                    ),
                    Ok(_) => Ok(ReminderOutcome::NotPermitted),
                    Err(e) => {
                        tracing::warn!(error = %e, "notification permission request failed");
                        Ok(ReminderOutcome::NotPermitted)
                    }
                };
            }
            NotificationPermission::Granted => {}
            _ => return Ok(ReminderOutcome::NotPermitted),
        }

        if self.ledger.last_reminder_date()? == Some(today) {
            return Ok(ReminderOutcome::AlreadySentToday);
        }

        let low = low_inventory_items_with(items, self.policy.low_item_days);
        let upcoming = upcoming_bills_with(bills, self.policy.upcoming_bill_days, today);
        let Some(body) = compose_reminder(&low, &upcoming) else {
            return Ok(ReminderOutcome::NothingToReport);
        };

        match self.notifier.notify(REMINDER_TITLE, &body) {
            Ok(()) => {
                self.ledger.set_last_reminder_date(today)?;
                tracing::debug!(%today, "reminder dispatched");
                Ok(ReminderOutcome::Dispatched { body })
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to dispatch reminder notification");
                Ok(ReminderOutcome::DispatchFailed { body })
            }
        }
    }
}

/// Handle to a running daily reminder loop.
pub struct ReminderSchedule {
    handle: tokio::task::JoinHandle<()>,
}

impl ReminderSchedule {
    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the loop to end (it only ends when cancelled).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Check immediately, then every `period`, until cancelled.
///
/// `load` is called before every check so each tick sees the current
/// inventory and bills. A failed load skips that tick. Must be called from
/// within a tokio runtime. The date guard keeps repeated ticks on the same
/// day from sending twice.
pub fn schedule_daily<N, L, F>(
    mut dispatcher: ReminderDispatcher<N, L>,
    mut load: F,
    period: Duration,
) -> ReminderSchedule
where
    N: Notifier + Send + 'static,
    L: ReminderLedger + Send + 'static,
    F: FnMut() -> Result<(Vec<InventoryItem>, Vec<Bill>)> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let (items, bills) = match load() {
                Ok(household) => household,
                Err(e) => {
                    tracing::warn!(error = %e, "could not load household for reminder check");
                    continue;
                }
            };
            match dispatcher.check_and_notify(&items, &bills, ReminderOptions::default(), today()) {
                Ok(outcome) => tracing::info!(?outcome, "scheduled reminder check"),
                Err(e) => tracing::warn!(error = %e, "scheduled reminder check failed"),
            }
        }
    });
    ReminderSchedule { handle }
}
