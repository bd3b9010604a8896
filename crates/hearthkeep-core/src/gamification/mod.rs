//! Gamification engine: points, history, streaks, badges, levels.
//!
//! Every transition is a pure function that consumes a
//! [`GamificationState`] and returns the next one. Time is passed in by
//! the caller, so nothing here reads a clock, touches storage, or fails.
//! The host must thread transitions through the most recently produced
//! state; applying two transitions to the same prior state loses one.

mod badges;
mod engine;
mod levels;
mod rewards;
mod state;

pub use badges::{evaluate_badges, Badge, PREPAREDNESS_FLOOR_DAYS};
pub use engine::{
    award_points, register_bill_paid, register_inventory_event, register_reminder_response,
    update_streak,
};
pub use levels::{level_for_points, level_progress, Level, LevelProgress, LEVELS};
pub use rewards::{Award, RewardKind};
pub use state::{
    streak_message, Counters, GamificationState, HistoryEntry, StreakState, HISTORY_LIMIT,
};
