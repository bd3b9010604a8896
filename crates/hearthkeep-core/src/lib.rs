//! # Hearthkeep Core Library
//!
//! This library provides the rules engine behind Hearthkeep, a household
//! upkeep tracker. Everything is available through the standalone
//! `hearthkeep` CLI, which is a thin host over this crate.
//!
//! ## Architecture
//!
//! - **Rules engine**: pure functions over inventory, bills and a
//!   [`GamificationState`]. Time is injected, nothing reads a clock.
//! - **Tracker**: applies household mutations and the matching point,
//!   badge and streak transitions in one place
//! - **Storage**: SQLite key-value snapshots and TOML configuration
//! - **Reminders**: once-per-day notification decision with injected
//!   notifier and ledger
//! - **Assistant**: prompt assembly and relay to a chat-completions API
//!
//! ## Key Components
//!
//! - [`HouseholdTracker`]: Host adapter over the engine
//! - [`household_health`]: 0-100 household health score
//! - [`ReminderDispatcher`]: Daily reminder decision
//! - [`Database`]: Snapshot persistence
//! - [`Config`]: Application configuration management

pub mod assistant;
pub mod calculations;
mod credentials;
pub mod error;
pub mod gamification;
pub mod health;
pub mod household;
pub mod reminders;
pub mod storage;
pub mod thresholds;
pub mod tracker;

pub use error::{AssistantError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use gamification::{Award, Badge, GamificationState, HistoryEntry, RewardKind};
pub use health::{household_health, HealthStatus, HouseholdHealth};
pub use household::{Bill, InventoryItem, Location, Member, MemberRole, Preferences};
pub use reminders::{ReminderDispatcher, ReminderOutcome};
pub use storage::{Config, Database};
pub use tracker::HouseholdTracker;
