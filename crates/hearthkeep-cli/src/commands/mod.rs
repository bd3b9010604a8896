//! Subcommand implementations.
//!
//! Each command loads the latest snapshot, applies one transition chain
//! and writes the result back before printing.

pub mod ask;
pub mod auth;
pub mod bill;
pub mod config;
pub mod history;
pub mod item;
pub mod member;
pub mod prefs;
pub mod remind;
pub mod status;
pub mod streak;

use hearthkeep_core::{Database, HouseholdTracker};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database and load every collection.
pub fn open_tracker() -> Result<(Database, HouseholdTracker), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tracker = HouseholdTracker::load(&db)?;
    Ok((db, tracker))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Render days for humans; infinite supply prints as a dash.
pub fn format_days(days: f64) -> String {
    if days.is_finite() {
        format!("{days:.1}")
    } else {
        "-".to_string()
    }
}
