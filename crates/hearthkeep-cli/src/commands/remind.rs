//! Reminder commands.

use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use hearthkeep_core::calculations::today;
use hearthkeep_core::reminders::{
    schedule_daily, NotificationPermission, Notifier, ReminderDispatcher, ReminderOptions,
};
use hearthkeep_core::{Config, Database, ReminderOutcome};

use super::{open_tracker, CmdResult};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Run today's reminder check once
    Check,
    /// Keep running and check on an interval
    Watch {
        /// Hours between checks (default: config reminders.interval_hours)
        #[arg(long)]
        interval_hours: Option<u64>,
    },
    /// Acknowledge a reminder (earns points)
    Ack,
}

/// Prints reminders to stdout. A terminal can always show them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    fn request_permission(
        &mut self,
    ) -> Result<NotificationPermission, Box<dyn std::error::Error + Send + Sync>> {
        Ok(NotificationPermission::Granted)
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!("[{title}] {body}");
        Ok(())
    }
}

fn describe(outcome: &ReminderOutcome) -> Option<&'static str> {
    match outcome {
        ReminderOutcome::Dispatched { .. } => None,
        ReminderOutcome::Unsupported => Some("Notifications are not supported here."),
        ReminderOutcome::NotPermitted => Some("Notifications are not permitted."),
        ReminderOutcome::AlreadySentToday => Some("Already reminded today."),
        ReminderOutcome::NothingToReport => Some("Nothing to remind about."),
        ReminderOutcome::DispatchFailed { .. } => Some("Reminder could not be shown."),
    }
}

pub fn run(action: RemindAction) -> CmdResult {
    let config = Config::load()?;
    match action {
        RemindAction::Check => {
            if !config.reminders.enabled {
                println!("Reminders are disabled (reminders.enabled = false).");
                return Ok(());
            }
            let (mut db, tracker) = open_tracker()?;
            let mut dispatcher =
                ReminderDispatcher::new(ConsoleNotifier, &mut db).with_policy(config.reminder_policy());
            let outcome = dispatcher.check_and_notify(
                &tracker.inventory,
                &tracker.bills,
                ReminderOptions::default(),
                today(),
            )?;
            if let Some(message) = describe(&outcome) {
                println!("{message}");
            }
        }
        RemindAction::Watch { interval_hours } => {
            if !config.reminders.enabled {
                println!("Reminders are disabled (reminders.enabled = false).");
                return Ok(());
            }
            let hours = interval_hours.unwrap_or(config.reminders.interval_hours).max(1);
            let db = Database::open()?;
            let dispatcher = ReminderDispatcher::new(ConsoleNotifier, db).with_policy(config.reminder_policy());

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async move {
                let schedule = schedule_daily(
                    dispatcher,
                    || {
                        let db = Database::open()?;
                        Ok((db.load_inventory()?, db.load_bills()?))
                    },
                    Duration::from_secs(hours * 60 * 60),
                );
                tracing::info!(hours, "reminder watch started");
                schedule.join().await;
            });
        }
        RemindAction::Ack => {
            let (db, mut tracker) = open_tracker()?;
            let before = tracker.gamification.points;
            tracker.acknowledge_reminder(Utc::now());
            tracker.save(&db)?;
            println!("Reminder acknowledged: +{} points", tracker.gamification.points - before);
        }
    }
    Ok(())
}
